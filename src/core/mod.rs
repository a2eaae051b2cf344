pub mod dispatcher;
pub mod matcher;
pub mod resolver;
pub mod service;
pub mod templates;

pub use crate::domain::model::{DispatchOutcome, Recipient, RecipientSet};
pub use crate::domain::ports::{CatalogApi, ConfigProvider, Mailer};
pub use crate::utils::error::Result;
