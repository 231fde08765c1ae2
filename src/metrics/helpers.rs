//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use crate::template::Scenario;

use super::{DELIVERY_LATENCY, EMAILS_FAILED_TOTAL, EMAILS_SENT_TOTAL, SCENARIO_TOTAL};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording dispatch pipeline metrics
pub struct DispatchMetrics;

impl DispatchMetrics {
    /// Record a delivered and recorded email
    pub fn record_sent(kind: &str) {
        EMAILS_SENT_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a failure at the given pipeline stage
    pub fn record_failed(stage: &str) {
        EMAILS_FAILED_TOTAL.with_label_values(&[stage]).inc();
    }

    /// Record provider call latency
    pub fn record_delivery_latency(seconds: f64) {
        DELIVERY_LATENCY.observe(seconds);
    }

    /// Record a rendered appointment scenario
    pub fn record_scenario(scenario: Scenario) {
        SCENARIO_TOTAL.with_label_values(&[scenario.as_str()]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_metrics_are_encoded() {
        DispatchMetrics::record_sent("generic");
        DispatchMetrics::record_failed("delivery");
        DispatchMetrics::record_delivery_latency(0.2);
        DispatchMetrics::record_scenario(Scenario::Confirmed);

        let output = encode_metrics().unwrap();
        assert!(output.contains("appointment_notify_emails_sent_total"));
        assert!(output.contains("appointment_notify_emails_failed_total"));
        assert!(output.contains("appointment_notify_delivery_latency_seconds"));
        assert!(output.contains("scenario=\"confirmed\""));
    }
}
