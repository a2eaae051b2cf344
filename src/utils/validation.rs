use crate::domain::model::OrderStatus;
use crate::utils::error::{NotifyError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NotifyError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NotifyError::config(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(NotifyError::config(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(NotifyError::config(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NotifyError::MissingConfig {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NotifyError::config(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    value
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|e| NotifyError::config(field_name, format!("Invalid email address: {}", e)))
}

/// Request ids arrive as arbitrary JSON numbers; only positive integers are usable.
pub fn validate_positive_id(field_name: &str, value: &serde_json::Value) -> Result<u64> {
    match value.as_u64() {
        Some(id) if id > 0 => Ok(id),
        _ => Err(NotifyError::validation(
            field_name,
            "must be a positive integer",
        )),
    }
}

pub fn validate_order_status(field_name: &str, value: &str) -> Result<OrderStatus> {
    value.parse::<OrderStatus>().map_err(|_| {
        NotifyError::validation(
            field_name,
            format!("must be one of: {}", OrderStatus::ALL_NAMES.join(", ")),
        )
    })
}
