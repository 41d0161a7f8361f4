//! Public availability route.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use turnera_core::{ServiceId, StaffId};

use crate::error::Result;
use crate::services::{AvailabilityService, DayAvailability};
use crate::state::AppState;

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub service_id: ServiceId,
    pub staff_id: Option<StaffId>,
}

/// Show bookable slots for a service over the rolling 15-day window.
///
/// GET /companies/{slug}/availability?service_id=&staff_id=
///
/// Without `staff_id`, slots are collapsed across staff by start time;
/// with it, each slot carries the staff identity. Dates with no slots are
/// omitted.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug, service, or staff
/// member.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<Vec<DayAvailability>>> {
    let slug = super::parse_slug(&slug)?;

    let days = AvailabilityService::new(state.pool())
        .availability(&slug, params.service_id, params.staff_id)
        .await?;

    Ok(Json(days))
}
