// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod http;
pub mod mail;

pub use http::HttpCatalogClient;
pub use mail::{LogMailer, SmtpMailer};
