//! Email dispatch pipeline.
//!
//! Each request runs independently through:
//! 1. validation of required fields
//! 2. template rendering (appointment requests only)
//! 3. a single provider delivery attempt
//! 4. persistence of the delivery record
//!
//! Any failure ends the request. A store failure after a successful delivery
//! is still reported as a failure; the provider message id is logged so the
//! unrecorded send can be traced.

mod dispatcher;
mod error;
mod request;

pub use dispatcher::{DispatchOutcome, EmailDispatcher};
pub use error::DispatchError;
pub use request::{AppointmentEmail, AppointmentEmailRequest, EmailMessage, SendEmailRequest};
