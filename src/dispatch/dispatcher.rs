//! Email dispatcher: validate, render, deliver, record.

use std::sync::Arc;
use std::time::Instant;

use crate::delivery::{DeliveryClient, DeliveryReceipt, OutgoingEmail};
use crate::metrics::DispatchMetrics;
use crate::record::{DeliveryRecord, NewDeliveryRecord, RecordStore};
use crate::template::render;

use super::error::DispatchError;
use super::request::{AppointmentEmailRequest, SendEmailRequest};

const KIND_GENERIC: &str = "generic";
const KIND_APPOINTMENT: &str = "appointment";

/// Result of a delivered and recorded email
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub receipt: DeliveryReceipt,
    pub record: DeliveryRecord,
}

/// Runs the send pipeline for one request at a time.
///
/// Holds no per-request state; the delivery client and record store are
/// injected at startup and shared by all requests.
pub struct EmailDispatcher {
    delivery: Arc<dyn DeliveryClient>,
    records: Arc<dyn RecordStore>,
    /// Verified sender identity
    from_email: String,
}

impl EmailDispatcher {
    pub fn new(
        delivery: Arc<dyn DeliveryClient>,
        records: Arc<dyn RecordStore>,
        from_email: impl Into<String>,
    ) -> Self {
        Self {
            delivery,
            records,
            from_email: from_email.into(),
        }
    }

    pub fn delivery_backend(&self) -> &'static str {
        self.delivery.backend_type()
    }

    pub fn record_store(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    /// Send a caller-composed email.
    pub async fn send_email(
        &self,
        request: SendEmailRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let message = request.validate().map_err(record_failure)?;

        tracing::info!(
            to = %message.to_email,
            subject = %message.subject,
            "Received email request"
        );

        let outcome = self
            .deliver_and_record(message.to_email, message.subject, message.content)
            .await
            .map_err(record_failure)?;

        DispatchMetrics::record_sent(KIND_GENERIC);
        Ok(outcome)
    }

    /// Render and send an appointment status email.
    pub async fn send_appointment_email(
        &self,
        request: AppointmentEmailRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let appointment = request.validate().map_err(record_failure)?;

        tracing::info!(
            to = %appointment.to_email,
            scenario = %appointment.scenario,
            "Received appointment email request"
        );

        let rendered = render(appointment.scenario, &appointment.details);
        DispatchMetrics::record_scenario(appointment.scenario);

        let outcome = self
            .deliver_and_record(appointment.to_email, rendered.subject, rendered.body)
            .await
            .map_err(record_failure)?;

        DispatchMetrics::record_sent(KIND_APPOINTMENT);
        Ok(outcome)
    }

    async fn deliver_and_record(
        &self,
        to_email: String,
        subject: String,
        body: String,
    ) -> Result<DispatchOutcome, DispatchError> {
        let email = OutgoingEmail {
            from: self.from_email.clone(),
            to: to_email,
            subject,
            body,
        };

        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            backend = self.delivery.backend_type(),
            "Sending email"
        );
        tracing::debug!(body = %email.body, "Email body");

        let started = Instant::now();
        let delivered = self.delivery.deliver(&email).await;
        DispatchMetrics::record_delivery_latency(started.elapsed().as_secs_f64());

        let receipt = delivered.map_err(|e| {
            tracing::error!(
                to = %email.to,
                error_kind = e.kind(),
                error = %e,
                "Email delivery failed"
            );
            DispatchError::Delivery(e)
        })?;

        tracing::info!(
            message_id = %receipt.message_id,
            status = receipt.status_code,
            "Email accepted by provider"
        );

        let new_record = NewDeliveryRecord {
            to_email: email.to,
            subject: email.subject,
            content: email.body,
        };

        match self.records.persist(new_record).await {
            Ok(record) => {
                tracing::info!(
                    record_id = %record.id,
                    message_id = %receipt.message_id,
                    "Delivery record saved"
                );
                Ok(DispatchOutcome { receipt, record })
            }
            Err(e) => {
                tracing::error!(
                    message_id = %receipt.message_id,
                    store = self.records.backend_type(),
                    error = %e,
                    "Email was delivered but the delivery record could not be saved"
                );
                Err(DispatchError::Store {
                    message_id: receipt.message_id,
                    source: e,
                })
            }
        }
    }
}

fn record_failure(err: DispatchError) -> DispatchError {
    DispatchMetrics::record_failed(err.stage());
    err
}
