pub mod toml_config;

pub use toml_config::{LogFormat, NotifierConfig, SmtpTls};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "brew-notifier")]
#[command(about = "Sale, order-status and low-stock notifications for the brewery catalog")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP notification API
    Serve,
    /// Notify buyers and taste-matched users that a product is on sale
    Sale {
        #[arg(long)]
        product_id: u64,
    },
    /// Tell one user that their order changed status
    OrderStatus {
        #[arg(long)]
        user_id: u64,
        #[arg(long)]
        order_id: u64,
        #[arg(long)]
        status: String,
    },
    /// Alert the stock administrator about a product
    LowStock {
        #[arg(long)]
        product_id: u64,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_config(&self) -> crate::utils::error::Result<NotifierConfig> {
        match &self.config {
            Some(path) => NotifierConfig::from_file(path),
            None => Ok(NotifierConfig::default()),
        }
    }
}
