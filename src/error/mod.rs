use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::DispatchError;

/// Failure of an email endpoint, tagged with the endpoint that failed
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email sending failed: {0}")]
    EmailSend(DispatchError),

    #[error("Appointment email sending failed: {0}")]
    AppointmentSend(DispatchError),
}

/// Uniform response envelope for every email endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::EmailSend(e) | AppError::AppointmentSend(e) => match e {
                DispatchError::Validation(_) => "VALIDATION_ERROR",
                DispatchError::Delivery(_) => "DELIVERY_ERROR",
                DispatchError::Store { .. } => "STORE_ERROR",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = self.to_string();

        tracing::error!(
            code = %code,
            status = %StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message = %message,
            "API error"
        );

        // Every failure shares one status and envelope
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(message)),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::DeliveryError;

    #[test]
    fn test_messages_carry_endpoint_prefix() {
        let err = AppError::EmailSend(DispatchError::Validation(
            "Missing required parameter(s): subject".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Email sending failed: Missing required parameter(s): subject"
        );

        let err = AppError::AppointmentSend(DispatchError::Delivery(DeliveryError::Transport(
            "dispatch failure".to_string(),
        )));
        assert_eq!(
            err.to_string(),
            "Appointment email sending failed: Transport failure: dispatch failure"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            AppError::EmailSend(DispatchError::Validation(String::new())).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::AppointmentSend(DispatchError::Delivery(DeliveryError::Throttled(
                String::new()
            )))
            .code(),
            "DELIVERY_ERROR"
        );
    }

    #[test]
    fn test_into_response_is_500() {
        let response =
            AppError::AppointmentSend(DispatchError::Validation("bad json".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
