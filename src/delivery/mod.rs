//! Outbound email delivery.
//!
//! `DeliveryClient` abstracts the transactional-email provider. Two
//! implementations are selected at startup by `delivery.backend`:
//! - `ses`: AWS SES v2 (production)
//! - `log`: logs the message and returns a synthetic message id (local development)
//!
//! Clients perform exactly one attempt per call. Failures are surfaced to the
//! caller immediately.

mod backend;
mod factory;
mod log_backend;
mod ses_backend;

pub use backend::{DeliveryClient, DeliveryError, DeliveryReceipt, OutgoingEmail};
pub use factory::{build_ses_client, create_delivery_client};
pub use log_backend::LogDeliveryClient;
pub use ses_backend::SesDeliveryClient;
