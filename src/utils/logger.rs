use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives for one-shot commands and the compact server log.
/// Request spans from `tower_http` follow the crate's own level.
fn cli_directives(verbose: bool) -> &'static str {
    if verbose {
        "brew_notifier=debug,tower_http=debug,lettre=info,info"
    } else {
        "brew_notifier=info,tower_http=info,warn"
    }
}

fn json_directives(level: &str) -> String {
    format!("brew_notifier={level},tower_http={level},lettre=warn,warn")
}

fn env_filter_or(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter_or(cli_directives(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines for the long-running server, so log shippers can index fields.
pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter_or(&json_directives(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
