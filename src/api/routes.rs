use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::email::{send_appointment_email, send_appointment_email_json, send_email};
use super::health::health;
use super::metrics::prometheus_metrics;

/// Base path shared by the email endpoints
pub const API_BASE_PATH: &str = "/notificationservice/api";

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Email endpoints
        .nest(
            API_BASE_PATH,
            Router::new()
                .route("/email/send", post(send_email))
                .route("/email/appointment", post(send_appointment_email))
                .route("/email/appointment/json", post(send_appointment_email_json)),
        )
}
