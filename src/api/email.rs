//! Email send endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dispatch::{AppointmentEmailRequest, DispatchError, SendEmailRequest};
use crate::error::{ApiResponse, AppError, Result};
use crate::metrics::DispatchMetrics;
use crate::server::AppState;

use super::extract::{Params, ParamsRejection};

/// Validation failure raised before the dispatcher runs
fn rejected(message: String) -> DispatchError {
    let err = DispatchError::Validation(message);
    DispatchMetrics::record_failed(err.stage());
    tracing::warn!(error = %err, "Request rejected during extraction");
    err
}

/// POST /notificationservice/api/email/send
#[tracing::instrument(name = "http.send_email", skip_all)]
pub async fn send_email(
    State(state): State<AppState>,
    params: std::result::Result<Params<SendEmailRequest>, ParamsRejection>,
) -> Result<Json<ApiResponse>> {
    let Params(request) =
        params.map_err(|e| AppError::EmailSend(rejected(e.message)))?;

    let outcome = state
        .dispatcher
        .send_email(request)
        .await
        .map_err(AppError::EmailSend)?;

    tracing::info!(record_id = %outcome.record.id, "Email request processed");
    Ok(Json(ApiResponse::ok("Email sent successfully")))
}

/// POST /notificationservice/api/email/appointment
#[tracing::instrument(name = "http.send_appointment_email", skip_all)]
pub async fn send_appointment_email(
    State(state): State<AppState>,
    params: std::result::Result<Params<AppointmentEmailRequest>, ParamsRejection>,
) -> Result<Json<ApiResponse>> {
    let Params(request) =
        params.map_err(|e| AppError::AppointmentSend(rejected(e.message)))?;

    dispatch_appointment(&state, request).await
}

/// POST /notificationservice/api/email/appointment/json
#[tracing::instrument(name = "http.send_appointment_email_json", skip_all)]
pub async fn send_appointment_email_json(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AppointmentEmailRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(request) = payload
        .map_err(|e| AppError::AppointmentSend(rejected(e.body_text())))?;

    tracing::info!(
        to = ?request.to_email,
        scenario = ?request.scenario,
        "Received JSON appointment email request"
    );

    dispatch_appointment(&state, request).await
}

async fn dispatch_appointment(
    state: &AppState,
    request: AppointmentEmailRequest,
) -> Result<Json<ApiResponse>> {
    let outcome = state
        .dispatcher
        .send_appointment_email(request)
        .await
        .map_err(AppError::AppointmentSend)?;

    tracing::info!(record_id = %outcome.record.id, "Appointment email processed");
    Ok(Json(ApiResponse::ok("Appointment email sent successfully")))
}
