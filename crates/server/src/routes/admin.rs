//! Admin routes: tenant provisioning and statistics.
//!
//! All handlers take the [`RequireAdmin`] extractor first, so a missing or
//! wrong `x-admin-token` header rejects before any work happens.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Days, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use turnera_core::schedule::{Weekday, to_minutes};
use turnera_core::{ServiceId, StaffId};

use crate::db::{AppointmentRepository, ServiceRepository, StaffRepository, TenantRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Service, Shift, Staff, Tenant};
use crate::state::AppState;

// ============================================================================
// Provisioning
// ============================================================================

/// Request body for creating a tenant.
#[derive(Debug, Deserialize)]
pub struct CreateTenantBody {
    pub slug: String,
    pub name: String,
    pub contact: String,
}

/// Create a tenant.
///
/// POST /admin/tenants
///
/// # Errors
///
/// Returns a validation error for a malformed slug or empty fields, and a
/// conflict when the slug is already taken.
#[instrument(skip(state, body), fields(slug = %body.slug))]
pub async fn create_tenant(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateTenantBody>,
) -> Result<(StatusCode, Json<Tenant>)> {
    let slug = super::parse_slug(&body.slug)?;
    require_nonempty("name", &body.name)?;
    require_nonempty("contact", &body.contact)?;

    let tenant = TenantRepository::new(state.pool())
        .create(&slug, body.name.trim(), body.contact.trim())
        .await?;

    tracing::info!(tenant_id = %tenant.id, "tenant created");

    Ok((StatusCode::CREATED, Json(tenant)))
}

/// Request body for creating a service.
#[derive(Debug, Deserialize)]
pub struct CreateServiceBody {
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
}

/// Create a service for a tenant.
///
/// POST /admin/tenants/{slug}/services
///
/// # Errors
///
/// Returns a validation error for an empty name or non-positive duration.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create_service(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CreateServiceBody>,
) -> Result<(StatusCode, Json<Service>)> {
    let slug = super::parse_slug(&slug)?;
    require_nonempty("name", &body.name)?;
    if body.duration_minutes <= 0 || body.duration_minutes > 1440 {
        return Err(AppError::Validation(
            "duration_minutes must be between 1 and 1440".to_owned(),
        ));
    }

    let tenant = lookup_tenant(&state, &slug).await?;
    let service = ServiceRepository::new(state.pool())
        .create(tenant.id, body.name.trim(), body.duration_minutes, body.price)
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

/// Request body for creating a staff member.
#[derive(Debug, Deserialize)]
pub struct CreateStaffBody {
    pub name: String,
}

/// Create a staff member for a tenant.
///
/// POST /admin/tenants/{slug}/staff
///
/// # Errors
///
/// Returns a validation error for an empty name.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create_staff(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CreateStaffBody>,
) -> Result<(StatusCode, Json<Staff>)> {
    let slug = super::parse_slug(&slug)?;
    require_nonempty("name", &body.name)?;

    let tenant = lookup_tenant(&state, &slug).await?;
    let staff = StaffRepository::new(state.pool())
        .create(tenant.id, body.name.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(staff)))
}

/// Request body for adding a shift.
#[derive(Debug, Deserialize)]
pub struct AddShiftBody {
    /// Day name; accent/case variants are accepted and canonicalized.
    pub weekday: String,
    /// Start time, "HH:MM".
    pub start_time: String,
    /// End time, "HH:MM", strictly after the start.
    pub end_time: String,
}

/// Add a shift for a staff member.
///
/// POST /admin/staff/{id}/shifts
///
/// # Errors
///
/// Returns a validation error for an unknown weekday name, malformed
/// times, or an empty window; not-found for an unknown staff member.
#[instrument(skip(state, body))]
pub async fn add_shift(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
    Json(body): Json<AddShiftBody>,
) -> Result<(StatusCode, Json<Shift>)> {
    let weekday = Weekday::from_name(&body.weekday)
        .ok_or_else(|| AppError::Validation(format!("unknown weekday {:?}", body.weekday)))?;
    let start = to_minutes(&body.start_time)
        .map_err(|e| AppError::Validation(format!("invalid start_time: {e}")))?;
    let end = to_minutes(&body.end_time)
        .map_err(|e| AppError::Validation(format!("invalid end_time: {e}")))?;
    if start >= end {
        return Err(AppError::Validation(
            "start_time must be before end_time".to_owned(),
        ));
    }

    let staff_repo = StaffRepository::new(state.pool());
    staff_repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("staff member {id}")))?;

    let shift = staff_repo
        .add_shift(id, weekday.canonical_name(), i32::from(start), i32::from(end))
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

/// Qualify a staff member for a service.
///
/// POST /admin/staff/{id}/services/{service_id}
///
/// # Errors
///
/// Returns not-found when the staff member does not exist or the service
/// belongs to another tenant, and a conflict when the link already exists.
#[instrument(skip(state))]
pub async fn add_qualification(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path((id, service_id)): Path<(StaffId, ServiceId)>,
) -> Result<StatusCode> {
    let staff_repo = StaffRepository::new(state.pool());
    let member = staff_repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("staff member {id}")))?;

    // The service must belong to the same tenant as the staff member
    ServiceRepository::new(state.pool())
        .get_for_tenant(member.tenant_id, service_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("service {service_id}")))?;

    staff_repo.add_qualification(id, service_id).await?;

    Ok(StatusCode::CREATED)
}

// ============================================================================
// Statistics
// ============================================================================

/// One statistics row: a label and an appointment count.
#[derive(Debug, Serialize)]
pub struct StatRow {
    pub label: String,
    pub count: i64,
}

fn stat_rows(rows: Vec<(String, i64)>) -> Vec<StatRow> {
    rows.into_iter()
        .map(|(label, count)| StatRow { label, count })
        .collect()
}

/// Appointments per "YYYY-M" month.
///
/// GET /admin/tenants/{slug}/stats/monthly
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug.
#[instrument(skip(state))]
pub async fn stats_monthly(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<StatRow>>> {
    let tenant = lookup_tenant(&state, &super::parse_slug(&slug)?).await?;
    let rows = AppointmentRepository::new(state.pool())
        .count_by_month(tenant.id)
        .await?;
    Ok(Json(stat_rows(rows)))
}

/// Appointments per staff member.
///
/// GET /admin/tenants/{slug}/stats/by-staff
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug.
#[instrument(skip(state))]
pub async fn stats_by_staff(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<StatRow>>> {
    let tenant = lookup_tenant(&state, &super::parse_slug(&slug)?).await?;
    let rows = AppointmentRepository::new(state.pool())
        .count_by_staff(tenant.id)
        .await?;
    Ok(Json(stat_rows(rows)))
}

/// Appointments per service.
///
/// GET /admin/tenants/{slug}/stats/by-service
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug.
#[instrument(skip(state))]
pub async fn stats_by_service(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<StatRow>>> {
    let tenant = lookup_tenant(&state, &super::parse_slug(&slug)?).await?;
    let rows = AppointmentRepository::new(state.pool())
        .count_by_service(tenant.id)
        .await?;
    Ok(Json(stat_rows(rows)))
}

/// Query parameters for the daily statistics endpoint.
#[derive(Debug, Deserialize)]
pub struct DailyStatsParams {
    /// Window length in days, today inclusive (default 7).
    pub days: Option<u32>,
}

/// Appointments per day over the last N days.
///
/// GET /admin/tenants/{slug}/stats/daily?days=7
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug and a validation error
/// for a zero-day window.
#[instrument(skip(state))]
pub async fn stats_daily(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<DailyStatsParams>,
) -> Result<Json<Vec<StatRow>>> {
    let days = params.days.unwrap_or(7);
    if days == 0 {
        return Err(AppError::Validation("days must be at least 1".to_owned()));
    }

    let tenant = lookup_tenant(&state, &super::parse_slug(&slug)?).await?;

    let today = Local::now().date_naive();
    let since = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| AppError::Validation("days window out of range".to_owned()))?;

    let rows = AppointmentRepository::new(state.pool())
        .count_by_day_since(tenant.id, since)
        .await?;
    Ok(Json(stat_rows(rows)))
}

// ============================================================================
// Helpers
// ============================================================================

async fn lookup_tenant(state: &AppState, slug: &turnera_core::Slug) -> Result<Tenant> {
    TenantRepository::new(state.pool())
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("company {slug}")))
}

fn require_nonempty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "missing required field: {field}"
        )));
    }
    Ok(())
}
