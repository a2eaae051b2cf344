use crate::config::toml_config::{MailConfig, SmtpTls};
use crate::domain::model::Envelope;
use crate::domain::ports::Mailer;
use crate::utils::error::{NotifyError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP delivery through lettre's async transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_name: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let builder = match config.tls {
            SmtpTls::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| NotifyError::config("mail.host", e.to_string()))?
            }
            SmtpTls::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotifyError::config("mail.host", e.to_string()))?,
            // Plain SMTP for local catchers such as Mailpit.
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };

        let mut builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from_name: config.from_name.clone(),
        })
    }

    fn build_message(&self, envelope: &Envelope) -> Result<Message> {
        let from_address: Address = envelope
            .from
            .parse()
            .map_err(|e| delivery_error(envelope, format!("Invalid from address: {}", e)))?;
        let from = Mailbox::new(Some(self.from_name.clone()), from_address);
        let to: Mailbox = envelope
            .to
            .parse()
            .map_err(|e| delivery_error(envelope, format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&envelope.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(envelope.text.clone())
            .map_err(|e| delivery_error(envelope, format!("Failed to build message: {}", e)))
    }
}

fn delivery_error(envelope: &Envelope, reason: String) -> NotifyError {
    NotifyError::Delivery {
        recipient: envelope.to.clone(),
        reason,
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        let message = self.build_message(envelope)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| delivery_error(envelope, format!("SMTP send failed: {}", e)))?;

        tracing::debug!(
            to = %envelope.to,
            code = %response.code(),
            "SMTP server accepted message"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// Writes envelopes to the log instead of sending them. Used when `[mail] enabled = false`.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        tracing::info!(
            from = %envelope.from,
            to = %envelope.to,
            subject = %envelope.subject,
            "Mail delivery disabled, logging message"
        );
        tracing::debug!(text = %envelope.text, "Message body");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
