use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Upstream {resource} request failed: {message}")]
    Upstream {
        resource: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Upstream {resource} request timed out")]
    UpstreamTimeout { resource: String },

    #[error("Unexpected {resource} payload: {message}")]
    DataShape { resource: String, message: String },

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },

    #[error("Invalid configuration value for {field}: {reason}")]
    Config { field: String, reason: String },

    #[error("Missing configuration field: {field}")]
    MissingConfig { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Delivery,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NotifyError {
    pub fn upstream(resource: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            resource: resource.to_string(),
            status,
            message: message.into(),
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(field: &str, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status surfaced to the caller of the inbound API.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Upstream {
                status: Some(status),
                ..
            } => *status,
            Self::DataShape { .. } => 502,
            Self::Validation { .. } => 400,
            _ => 500,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Upstream { .. } | Self::UpstreamTimeout { .. } | Self::DataShape { .. } => {
                ErrorCategory::Upstream
            }
            Self::Delivery { .. } => ErrorCategory::Delivery,
            Self::Validation { .. } => ErrorCategory::Input,
            Self::Config { .. } | Self::MissingConfig { .. } | Self::TomlParse(_) => {
                ErrorCategory::Configuration
            }
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Delivery => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Upstream {
                resource,
                status: Some(404),
                ..
            } => format!("The requested {} could not be found", resource),
            Self::Upstream { resource, .. } | Self::UpstreamTimeout { resource } => {
                format!("The catalog service could not provide {}", resource)
            }
            Self::Validation { field, reason } => format!("Invalid {}: {}", field, reason),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Upstream => "Check that the catalog API is reachable and base_url is correct",
            ErrorCategory::Delivery => "Check the SMTP settings in the [mail] section",
            ErrorCategory::Input => "Fix the request parameters and try again",
            ErrorCategory::Configuration => "Review the configuration file and environment variables",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Error sending notifications".to_string(),
            _ => self.user_friendly_message(),
        };
        let body = serde_json::json!({
            "message": message,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
