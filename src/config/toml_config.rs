use crate::domain::ports::ConfigProvider;
use crate::utils::error::{NotifyError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3005,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub inventory_path: String,
    pub orders_path: String,
    pub users_path: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5089".to_string(),
            timeout_seconds: 10,
            inventory_path: "/api/inventory".to_string(),
            orders_path: "/api/order".to_string(),
            users_path: "/api/auth".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// When false, envelopes are logged instead of sent.
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: SmtpTls,
    pub from_email: String,
    pub from_name: String,
    pub admin_email: String,
    pub send_timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            tls: SmtpTls::None,
            from_email: "notifications@brewery.local".to_string(),
            from_name: "Brewery Notifications".to_string(),
            admin_email: "admin@brewery.local".to_string(),
            send_timeout_seconds: 15,
        }
    }
}

/// How the SMTP connection is secured. `starttls` upgrades a plain session
/// (submission port 587); `wrapper` opens TLS immediately (port 465).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    None,
    Starttls,
    Wrapper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            level: "info".to_string(),
        }
    }
}

impl NotifierConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| NotifyError::config("env_substitution", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("upstream.base_url", &self.upstream.base_url)?;
        validation::validate_positive_number(
            "upstream.timeout_seconds",
            self.upstream.timeout_seconds,
            1,
        )?;
        for (field, path) in [
            ("upstream.inventory_path", &self.upstream.inventory_path),
            ("upstream.orders_path", &self.upstream.orders_path),
            ("upstream.users_path", &self.upstream.users_path),
        ] {
            validation::validate_non_empty_string(field, path)?;
        }

        validation::validate_email("mail.from_email", &self.mail.from_email)?;
        validation::validate_email("mail.admin_email", &self.mail.admin_email)?;
        validation::validate_positive_number(
            "mail.send_timeout_seconds",
            self.mail.send_timeout_seconds,
            1,
        )?;

        if self.mail.enabled {
            validation::validate_non_empty_string("mail.host", &self.mail.host)?;
            if self.mail.username.is_some() {
                validation::validate_required_field("mail.password", &self.mail.password)?;
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ConfigProvider for NotifierConfig {
    fn from_address(&self) -> &str {
        &self.mail.from_email
    }

    fn admin_address(&self) -> &str {
        &self.mail.admin_email
    }

    fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.mail.send_timeout_seconds)
    }
}

impl Validate for NotifierConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
