//! Inbound request shapes and their validation.
//!
//! Every field is optional at the deserialization level so that missing
//! fields surface as a [`DispatchError::Validation`] rather than as an
//! extractor rejection.

use serde::Deserialize;

use crate::template::{AppointmentDetails, Scenario};

use super::error::DispatchError;

/// Generic email request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to_email: Option<String>,
    pub subject: Option<String>,
    pub content: Option<String>,
}

/// Appointment status email request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentEmailRequest {
    pub to_email: Option<String>,
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub session_start_time: Option<String>,
    pub session_end_time: Option<String>,
    pub scenario: Option<String>,
    pub new_start_time: Option<String>,
    pub new_end_time: Option<String>,
}

/// Validated generic email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub content: String,
}

/// Validated appointment email
#[derive(Debug, Clone)]
pub struct AppointmentEmail {
    pub to_email: String,
    pub scenario: Scenario,
    pub details: AppointmentDetails,
}

fn check_present(fields: &[(&'static str, bool)]) -> Result<(), DispatchError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DispatchError::Validation(format!(
            "Missing required parameter(s): {}",
            missing.join(", ")
        )))
    }
}

impl SendEmailRequest {
    pub fn validate(self) -> Result<EmailMessage, DispatchError> {
        check_present(&[
            ("toEmail", self.to_email.is_some()),
            ("subject", self.subject.is_some()),
            ("content", self.content.is_some()),
        ])?;

        Ok(EmailMessage {
            to_email: self.to_email.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        })
    }
}

impl AppointmentEmailRequest {
    /// Validate required fields. `newStartTime`/`newEndTime` stay optional
    /// for every scenario, including reschedule.
    pub fn validate(self) -> Result<AppointmentEmail, DispatchError> {
        check_present(&[
            ("toEmail", self.to_email.is_some()),
            ("doctorName", self.doctor_name.is_some()),
            ("patientName", self.patient_name.is_some()),
            ("sessionStartTime", self.session_start_time.is_some()),
            ("sessionEndTime", self.session_end_time.is_some()),
            ("scenario", self.scenario.is_some()),
        ])?;

        Ok(AppointmentEmail {
            to_email: self.to_email.unwrap_or_default(),
            scenario: Scenario::from_tag(self.scenario.as_deref()),
            details: AppointmentDetails {
                doctor_name: self.doctor_name.unwrap_or_default(),
                patient_name: self.patient_name.unwrap_or_default(),
                session_start_time: self.session_start_time.unwrap_or_default(),
                session_end_time: self.session_end_time.unwrap_or_default(),
                new_start_time: self.new_start_time,
                new_end_time: self.new_end_time,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn appointment_request() -> AppointmentEmailRequest {
        AppointmentEmailRequest {
            to_email: Some("a@b.com".to_string()),
            doctor_name: Some("Lee".to_string()),
            patient_name: Some("Tan".to_string()),
            session_start_time: Some("2024-01-01 10:00".to_string()),
            session_end_time: Some("2024-01-01 10:30".to_string()),
            scenario: Some("Confirmed".to_string()),
            new_start_time: None,
            new_end_time: None,
        }
    }

    #[test]
    fn test_send_email_request_valid() {
        let request = SendEmailRequest {
            to_email: Some("a@b.com".to_string()),
            subject: Some("Hello".to_string()),
            content: Some("".to_string()),
        };

        let message = request.validate().unwrap();
        assert_eq!(message.to_email, "a@b.com");
        assert_eq!(message.content, "");
    }

    #[test]
    fn test_send_email_request_lists_missing_fields() {
        let request = SendEmailRequest {
            to_email: Some("a@b.com".to_string()),
            ..Default::default()
        };

        let err = request.validate().unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Missing required parameter(s): subject, content"
        );
    }

    #[test]
    fn test_appointment_request_valid() {
        let appointment = appointment_request().validate().unwrap();
        assert_eq!(appointment.scenario, Scenario::Confirmed);
        assert_eq!(appointment.details.patient_name, "Tan");
        assert!(appointment.details.new_start_time.is_none());
    }

    #[test]
    fn test_appointment_request_missing_scenario() {
        let mut request = appointment_request();
        request.scenario = None;

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("scenario"));
    }

    #[test]
    fn test_appointment_request_empty_scenario_is_update() {
        let mut request = appointment_request();
        request.scenario = Some(String::new());

        assert_eq!(request.validate().unwrap().scenario, Scenario::Update);
    }

    #[test]
    fn test_appointment_request_deserializes_camel_case() {
        let request: AppointmentEmailRequest = serde_json::from_value(json!({
            "toEmail": "a@b.com",
            "doctorName": "Lee",
            "patientName": "Tan",
            "sessionStartTime": "2024-01-01 10:00",
            "sessionEndTime": "2024-01-01 10:30",
            "scenario": "reschedule",
            "newStartTime": "2024-01-02 10:00"
        }))
        .unwrap();

        let appointment = request.validate().unwrap();
        assert_eq!(appointment.scenario, Scenario::Reschedule);
        assert_eq!(
            appointment.details.new_start_time.as_deref(),
            Some("2024-01-02 10:00")
        );
        assert!(appointment.details.new_end_time.is_none());
    }
}
