pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{HttpCatalogClient, LogMailer, SmtpMailer};
pub use crate::config::NotifierConfig;
pub use crate::core::{dispatcher::Dispatcher, service::NotificationService};
pub use crate::utils::error::{NotifyError, Result};
