//! Public booking and cancellation routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use turnera_core::{AppointmentId, AppointmentStatus, ServiceId, StaffId};

use crate::error::Result;
use crate::models::Appointment;
use crate::services::booking::BookingRequest;
use crate::services::{BookingConfirmation, BookingService};
use crate::state::AppState;

/// Request body for booking an appointment.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentBody {
    pub client_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub service_id: ServiceId,
    /// Calendar date, "YYYY-MM-DD".
    pub date: NaiveDate,
    /// Start time, "HH:MM".
    pub time: String,
    /// Optional staff preference; omitted means "any free staff member".
    pub staff_id: Option<StaffId>,
}

/// Request body for cancelling an appointment.
#[derive(Debug, Deserialize)]
pub struct CancelAppointmentBody {
    pub national_id: String,
    /// Calendar date, "YYYY-MM-DD".
    pub date: NaiveDate,
    /// Start time, "HH:MM".
    pub time: String,
}

/// Appointment detail returned to clients.
#[derive(Debug, Serialize)]
pub struct AppointmentDetail {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
    pub client_name: String,
    pub national_id: String,
}

impl From<&Appointment> for AppointmentDetail {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            date: appointment.date,
            time: appointment.start_time(),
            end_time: appointment.end_time(),
            status: appointment.status,
            client_name: appointment.client_name.clone(),
            national_id: appointment.national_id.clone(),
        }
    }
}

/// Booking confirmation with resolved context.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub appointment: AppointmentDetail,
    pub company: String,
    pub service: String,
    pub staff: StaffSummary,
}

/// The assigned staff member.
#[derive(Debug, Serialize)]
pub struct StaffSummary {
    pub id: StaffId,
    pub name: String,
}

impl From<BookingConfirmation> for BookingResponse {
    fn from(confirmation: BookingConfirmation) -> Self {
        Self {
            message: "appointment booked".to_owned(),
            appointment: AppointmentDetail::from(&confirmation.appointment),
            company: confirmation.tenant.name,
            service: confirmation.service.name,
            staff: StaffSummary {
                id: confirmation.staff.id,
                name: confirmation.staff.name,
            },
        }
    }
}

/// Cancellation confirmation.
#[derive(Debug, Serialize)]
pub struct CancellationResponse {
    pub message: String,
    pub appointment: AppointmentDetail,
}

/// Book an appointment.
///
/// POST /companies/{slug}/appointments
///
/// # Errors
///
/// Returns a validation error for missing client fields, not-found for an
/// unknown tenant/service/staff reference, and a conflict when the
/// requested time cannot be served.
#[instrument(skip(state, body), fields(date = %body.date, time = %body.time))]
pub async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CreateAppointmentBody>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let slug = super::parse_slug(&slug)?;

    let request = BookingRequest {
        client_name: body.client_name,
        national_id: body.national_id,
        email: body.email,
        phone: body.phone,
        service_id: body.service_id,
        date: body.date,
        time: body.time,
        staff_id: body.staff_id,
    };

    let confirmation = BookingService::new(state.pool()).book(&slug, &request).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(confirmation))))
}

/// Cancel an appointment.
///
/// POST /companies/{slug}/appointments/cancel
///
/// Cancellation is looked up by (national id, date, time) and only applies
/// to an active appointment; a second call reports not-found.
///
/// # Errors
///
/// Returns `AppError::NotFound` when no matching active appointment exists.
#[instrument(skip(state, body), fields(date = %body.date, time = %body.time))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CancelAppointmentBody>,
) -> Result<Json<CancellationResponse>> {
    let _ = super::parse_slug(&slug)?;

    let cancelled = BookingService::new(state.pool())
        .cancel(&body.national_id, body.date, &body.time)
        .await?;

    Ok(Json(CancellationResponse {
        message: "appointment cancelled".to_owned(),
        appointment: AppointmentDetail::from(&cancelled),
    }))
}
