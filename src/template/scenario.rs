//! Appointment lifecycle scenarios

use std::fmt;

/// Appointment lifecycle event that selects the email template.
///
/// Tags are matched case-insensitively. Anything unrecognized, including an
/// empty or absent tag, resolves to [`Scenario::Update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Confirmed,
    Start,
    Stop,
    Reschedule,
    Update,
}

impl Scenario {
    /// Resolve a request-supplied scenario tag.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Scenario::Update;
        };

        match tag.to_lowercase().as_str() {
            "confirmed" => Scenario::Confirmed,
            "start" => Scenario::Start,
            "stop" => Scenario::Stop,
            "reschedule" => Scenario::Reschedule,
            _ => Scenario::Update,
        }
    }

    /// Fixed subject line for this scenario
    pub fn subject(&self) -> &'static str {
        match self {
            Scenario::Confirmed => "✅ Appointment Confirmed - Hospital Management System",
            Scenario::Start => "🏥 Your Appointment Has Started",
            Scenario::Stop => "✅ Appointment Completed",
            Scenario::Reschedule => "📅 Appointment Rescheduled",
            Scenario::Update => "📋 Appointment Update",
        }
    }

    /// Metric label / log field value
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Confirmed => "confirmed",
            Scenario::Start => "start",
            Scenario::Stop => "stop",
            Scenario::Reschedule => "reschedule",
            Scenario::Update => "update",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
