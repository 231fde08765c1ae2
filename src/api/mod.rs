//! API layer - HTTP endpoint handlers.

mod email;
mod extract;
mod health;
mod metrics;
mod routes;

pub use email::{send_appointment_email, send_appointment_email_json, send_email};
pub use extract::{Params, ParamsRejection};
pub use health::{health, HealthResponse, StoreHealthResponse};
pub use metrics::prometheus_metrics;
pub use routes::{api_routes, API_BASE_PATH};
