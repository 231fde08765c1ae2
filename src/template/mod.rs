//! Appointment email templates.
//!
//! This module provides:
//! - The fixed set of appointment scenarios (`confirmed`, `start`, `stop`, `reschedule`)
//!   plus a fallback for anything else
//! - A pure renderer turning a scenario and appointment details into a subject and body
//! - The organization signature appended to every body
//!
//! # Example
//!
//! ```ignore
//! let details = AppointmentDetails {
//!     doctor_name: "Lee".to_string(),
//!     patient_name: "Tan".to_string(),
//!     session_start_time: "2024-01-01 10:00".to_string(),
//!     session_end_time: "2024-01-01 10:30".to_string(),
//!     new_start_time: None,
//!     new_end_time: None,
//! };
//!
//! let rendered = render(Scenario::from_tag(Some("CONFIRMED")), &details);
//! assert!(rendered.body.starts_with("Dear Tan,"));
//! ```

mod render;
mod scenario;

pub use render::{render, AppointmentDetails, RenderedEmail, Signature, SIGNATURE};
pub use scenario::Scenario;
