//! Dispatch error taxonomy

use thiserror::Error;

use crate::delivery::DeliveryError;
use crate::record::StoreError;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request is missing required fields. Nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Provider rejected the message or the transport failed. Nothing was recorded.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Provider accepted the message but the record could not be written.
    #[error("email was delivered (message id {message_id}) but could not be recorded: {source}")]
    Store {
        message_id: String,
        #[source]
        source: StoreError,
    },
}

impl DispatchError {
    /// Pipeline stage that failed, used for metrics
    pub fn stage(&self) -> &'static str {
        match self {
            DispatchError::Validation(_) => "validation",
            DispatchError::Delivery(_) => "delivery",
            DispatchError::Store { .. } => "store",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels() {
        assert_eq!(DispatchError::Validation("x".into()).stage(), "validation");
        assert_eq!(
            DispatchError::Delivery(DeliveryError::Transport("x".into())).stage(),
            "delivery"
        );
        assert_eq!(
            DispatchError::Store {
                message_id: "m-1".into(),
                source: StoreError::Unavailable("down".into()),
            }
            .stage(),
            "store"
        );
    }

    #[test]
    fn test_store_error_message_names_message_id() {
        let err = DispatchError::Store {
            message_id: "m-1".into(),
            source: StoreError::Unavailable("connection refused".into()),
        };
        let message = err.to_string();
        assert!(message.contains("m-1"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_delivery_error_is_transparent() {
        let err = DispatchError::from(DeliveryError::Throttled("Maximum sending rate exceeded".into()));
        assert_eq!(
            err.to_string(),
            "Provider throttled the request: Maximum sending rate exceeded"
        );
    }
}
