//! Scenario-driven subject and body rendering

use super::scenario::Scenario;

/// Organization signature appended to every body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub organization: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
}

pub const SIGNATURE: Signature = Signature {
    organization: "Hospital Management System",
    phone: "+60-123-456-789",
    email: "support@hospital.com",
};

/// Appointment fields substituted into the templates.
///
/// Times are opaque display strings and are rendered verbatim.
#[derive(Debug, Clone, Default)]
pub struct AppointmentDetails {
    pub doctor_name: String,
    pub patient_name: String,
    pub session_start_time: String,
    pub session_end_time: String,
    /// Only used by the reschedule scenario
    pub new_start_time: Option<String>,
    /// Only used by the reschedule scenario
    pub new_end_time: Option<String>,
}

/// Subject and plain-text body ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Render the email for an appointment scenario.
pub fn render(scenario: Scenario, details: &AppointmentDetails) -> RenderedEmail {
    let doctor = &details.doctor_name;
    let window = time_window(&details.session_start_time, &details.session_end_time);

    let content = match scenario {
        Scenario::Confirmed => format!(
            "Your appointment has been CONFIRMED with the following details:\n\n\
             👨‍⚕️ Doctor: {doctor}\n\
             📅 Date & Time: {window}\n\n\
             Please arrive 15 minutes before your scheduled time.\n\
             Bring your ID and any relevant medical documents."
        ),
        Scenario::Start => format!(
            "Your appointment with Dr. {doctor} has STARTED.\n\n\
             📍 Please proceed to the consultation room.\n\
             ⏰ Session Time: {window}"
        ),
        Scenario::Stop => format!(
            "Your appointment with Dr. {doctor} has been COMPLETED.\n\n\
             ⏰ Session Duration: {window}\n\n\
             Thank you for visiting our hospital.\n\
             Please collect your prescription and follow-up instructions from the reception."
        ),
        Scenario::Reschedule => {
            // Missing new times render blank
            let new_window = time_window(
                details.new_start_time.as_deref().unwrap_or_default(),
                details.new_end_time.as_deref().unwrap_or_default(),
            );
            format!(
                "Your appointment with Dr. {doctor} has been RESCHEDULED.\n\n\
                 ❌ Previous Time: {window}\n\
                 ✅ New Time: {new_window}\n\n\
                 Please make note of the new timing and arrive 15 minutes early."
            )
        }
        Scenario::Update => format!(
            "Your appointment details:\n\n\
             Doctor: {doctor}\n\
             Time: {window}"
        ),
    };

    RenderedEmail {
        subject: scenario.subject().to_string(),
        body: format!(
            "Dear {},\n\n{}{}",
            details.patient_name,
            content,
            signature_block(&SIGNATURE)
        ),
    }
}

fn time_window(start: &str, end: &str) -> String {
    format!("{start} - {end}")
}

fn signature_block(signature: &Signature) -> String {
    format!(
        "\n\n---\n{}\nFor any queries, please contact: {}\nEmail: {}",
        signature.organization, signature.phone, signature.email
    )
}
