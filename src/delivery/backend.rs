//! Delivery client trait and shared types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a delivery client.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Sender or recipient identity is invalid or not verified with the provider
    #[error("Invalid or unverified identity: {0}")]
    InvalidIdentity(String),

    /// Provider is throttling this account
    #[error("Provider throttled the request: {0}")]
    Throttled(String),

    /// Message could not be built (e.g. empty recipient)
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Network or transport failure before a provider response was received
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Provider rejected the message for any other reason
    #[error("Provider rejected the message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl DeliveryError {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryError::InvalidIdentity(_) => "invalid_identity",
            DeliveryError::Throttled(_) => "throttled",
            DeliveryError::MalformedMessage(_) => "malformed_message",
            DeliveryError::Transport(_) => "transport",
            DeliveryError::Rejected { .. } => "rejected",
        }
    }
}

/// A fully addressed plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    /// Reject messages the provider can never accept.
    pub fn validate(&self) -> Result<(), DeliveryError> {
        if self.to.trim().is_empty() {
            return Err(DeliveryError::MalformedMessage(
                "recipient address is empty".to_string(),
            ));
        }
        if self.from.trim().is_empty() {
            return Err(DeliveryError::InvalidIdentity(
                "sender address is not configured".to_string(),
            ));
        }
        Ok(())
    }
}

/// Confirmation returned by the provider on a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier
    pub message_id: String,
    /// HTTP status code reported by the transport
    pub status_code: u16,
}

/// Sends a single email through an external provider.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Backend type identifier
    fn backend_type(&self) -> &'static str;

    /// Send `email`. No retries are performed.
    async fn deliver(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "noreply@hospital.com".to_string(),
            to: "a@b.com".to_string(),
            subject: "Subject".to_string(),
            body: "Body".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_addressed_email() {
        assert!(email().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_recipient() {
        let mut email = email();
        email.to = "   ".to_string();

        let err = email.validate().unwrap_err();
        assert!(matches!(err, DeliveryError::MalformedMessage(_)));
        assert_eq!(err.kind(), "malformed_message");
    }

    #[test]
    fn test_validate_rejects_missing_sender() {
        let mut email = email();
        email.from = String::new();

        let err = email.validate().unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidIdentity(_)));
    }

    #[test]
    fn test_error_display() {
        let err = DeliveryError::Rejected {
            status: 400,
            message: "Email address is not verified".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provider rejected the message (status 400): Email address is not verified"
        );
    }
}
