//! Prometheus metrics for the notification service.
//!
//! This module provides metrics for monitoring email dispatch:
//! - Emails sent by request kind
//! - Failures by pipeline stage (validation, delivery, store)
//! - Provider call latency
//! - Appointment scenario distribution

mod helpers;

pub use helpers::{encode_metrics, DispatchMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, Histogram, IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "appointment_notify";

lazy_static! {
    /// Emails delivered and recorded, by request kind (generic, appointment)
    pub static ref EMAILS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_emails_sent_total", METRIC_PREFIX),
        "Total number of emails delivered and recorded",
        &["kind"]
    ).unwrap();

    /// Failed send requests, by stage (validation, delivery, store)
    pub static ref EMAILS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_emails_failed_total", METRIC_PREFIX),
        "Total number of failed email send requests",
        &["stage"]
    ).unwrap();

    /// Provider call latency
    pub static ref DELIVERY_LATENCY: Histogram = register_histogram!(
        format!("{}_delivery_latency_seconds", METRIC_PREFIX),
        "Latency of the email provider send call",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();

    /// Appointment emails rendered, by scenario
    pub static ref SCENARIO_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_scenario_total", METRIC_PREFIX),
        "Appointment emails rendered per scenario",
        &["scenario"]
    ).unwrap();
}
