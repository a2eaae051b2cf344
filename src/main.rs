use brew_notifier::config::LogFormat;
use brew_notifier::domain::model::DispatchOutcome;
use brew_notifier::domain::ports::Mailer;
use brew_notifier::utils::error::{ErrorSeverity, NotifyError};
use brew_notifier::utils::{logger, validation::Validate, validation::validate_order_status};
use brew_notifier::{
    app, CliConfig, Command, HttpCatalogClient, LogMailer, NotificationService, NotifierConfig,
    SmtpMailer,
};
use clap::Parser;

type Service = NotificationService<HttpCatalogClient, Box<dyn Mailer>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    match (&cli.command, config.logging.format) {
        (Command::Serve, LogFormat::Json) => logger::init_json_logger(&config.logging.level),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting brew-notifier");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let service = match build_service(&config) {
        Ok(service) => service,
        Err(e) => exit_with(&e),
    };

    let result = match cli.command {
        Command::Serve => return serve(service, &config).await,
        Command::Sale { product_id } => service.notify_sale(product_id).await.map(|summary| {
            report(&summary.message(), &summary.outcome);
        }),
        Command::OrderStatus {
            user_id,
            order_id,
            status,
        } => match validate_order_status("status", &status) {
            Ok(status) => service
                .notify_order_status(user_id, order_id, status)
                .await
                .map(|summary| report(&summary.message(), &summary.outcome)),
            Err(e) => Err(e),
        },
        Command::LowStock { product_id } => service
            .notify_low_stock(product_id)
            .await
            .map(|summary| report(&summary.message(), &summary.outcome)),
    };

    if let Err(e) = result {
        tracing::error!(
            "Notification failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

fn build_service(config: &NotifierConfig) -> brew_notifier::Result<Service> {
    let catalog = HttpCatalogClient::new(&config.upstream)?;
    let mailer: Box<dyn Mailer> = if config.mail.enabled {
        Box::new(SmtpMailer::new(&config.mail)?)
    } else {
        tracing::warn!("Mail delivery disabled, messages will only be logged");
        Box::new(LogMailer)
    };
    tracing::info!(mailer = mailer.name(), upstream = %config.upstream.base_url, "Service configured");

    Ok(NotificationService::new(catalog, mailer, config))
}

async fn serve(service: Service, config: &NotifierConfig) -> anyhow::Result<()> {
    let app = app::router(service);
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("Notifications service is running on {}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Notifications service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn report(message: &str, outcome: &DispatchOutcome) {
    println!("✅ {}", message);
    for (recipient, reason) in outcome.failures() {
        println!("⚠️  {}: {}", recipient, reason);
    }
}

fn exit_with(e: &NotifyError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
