//! Log-only delivery client.
//!
//! Does not contact any provider. Useful for running the service locally
//! without AWS credentials.

use async_trait::async_trait;
use uuid::Uuid;

use super::backend::{DeliveryClient, DeliveryError, DeliveryReceipt, OutgoingEmail};

#[derive(Debug, Clone, Default)]
pub struct LogDeliveryClient;

impl LogDeliveryClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryClient for LogDeliveryClient {
    fn backend_type(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError> {
        email.validate()?;

        let message_id = format!("log-{}", Uuid::new_v4());

        tracing::info!(
            message_id = %message_id,
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            "Log delivery: email not sent to any provider"
        );
        tracing::debug!(body = %email.body, "Log delivery body");

        Ok(DeliveryReceipt {
            message_id,
            status_code: 200,
        })
    }
}
