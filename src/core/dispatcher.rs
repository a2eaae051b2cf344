use crate::domain::model::{
    DeliveryStatus, DispatchOutcome, Envelope, MessageContent, Recipient, RecipientOutcome,
    RecipientSet,
};
use crate::domain::ports::Mailer;
use futures::future::join_all;
use std::time::Duration;

/// Sends one message per recipient. All sends are in flight together and each
/// one settles independently, so a bad address never costs the rest of the batch.
pub struct Dispatcher<M: Mailer> {
    mailer: M,
    from: String,
    send_timeout: Duration,
}

impl<M: Mailer> Dispatcher<M> {
    pub fn new(mailer: M, from: impl Into<String>, send_timeout: Duration) -> Self {
        Self {
            mailer,
            from: from.into(),
            send_timeout,
        }
    }

    pub async fn dispatch<F>(&self, recipients: &RecipientSet, build: F) -> DispatchOutcome
    where
        F: Fn(&Recipient) -> MessageContent,
    {
        let sends = recipients.iter().map(|recipient| {
            let content = build(recipient);
            let envelope = Envelope {
                from: self.from.clone(),
                to: recipient.address().to_string(),
                subject: content.subject,
                text: content.text,
            };
            let key = recipient.key();
            async move {
                let status = self.deliver(&envelope).await;
                RecipientOutcome {
                    recipient: key,
                    address: envelope.to,
                    status,
                }
            }
        });

        let outcomes = join_all(sends).await;
        let outcome = DispatchOutcome {
            attempted: outcomes.len(),
            outcomes,
        };

        tracing::info!(
            mailer = self.mailer.name(),
            attempted = outcome.attempted,
            succeeded = outcome.succeeded(),
            failed = outcome.attempted - outcome.succeeded(),
            "Dispatch finished"
        );
        outcome
    }

    async fn deliver(&self, envelope: &Envelope) -> DeliveryStatus {
        match tokio::time::timeout(self.send_timeout, self.mailer.send(envelope)).await {
            Ok(Ok(())) => {
                tracing::debug!(to = %envelope.to, "Message delivered");
                DeliveryStatus::Delivered
            }
            Ok(Err(e)) => {
                tracing::warn!(to = %envelope.to, error = %e, "Message delivery failed");
                DeliveryStatus::Failed {
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!(to = %envelope.to, timeout = ?self.send_timeout, "Message delivery timed out");
                DeliveryStatus::Failed {
                    reason: format!("send timed out after {:?}", self.send_timeout),
                }
            }
        }
    }
}
