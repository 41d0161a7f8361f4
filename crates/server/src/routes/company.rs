//! Public tenant information route.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use turnera_core::StaffId;
use turnera_core::schedule::from_minutes;

use crate::db::{ServiceRepository, StaffRepository, TenantRepository};
use crate::error::{AppError, Result};
use crate::models::{Service, Shift, minute_of_day};
use crate::state::AppState;

/// Public view of a tenant: display info, services, and staff with their
/// working hours and qualifications.
#[derive(Debug, Serialize)]
pub struct CompanyInfo {
    pub name: String,
    pub contact: String,
    pub services: Vec<Service>,
    pub staff: Vec<StaffInfo>,
}

/// One staff member in the public tenant view.
#[derive(Debug, Serialize)]
pub struct StaffInfo {
    pub id: StaffId,
    pub name: String,
    pub shifts: Vec<ShiftInfo>,
    pub services: Vec<Service>,
}

/// A shift with times rendered as "HH:MM".
#[derive(Debug, Serialize)]
pub struct ShiftInfo {
    pub weekday: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&Shift> for ShiftInfo {
    fn from(shift: &Shift) -> Self {
        Self {
            weekday: shift.weekday.clone(),
            start_time: from_minutes(minute_of_day(shift.start_minute)),
            end_time: from_minutes(minute_of_day(shift.end_minute)),
        }
    }
}

/// Show a tenant's public info.
///
/// GET /companies/{slug}
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CompanyInfo>> {
    let slug = super::parse_slug(&slug)?;

    let tenants = TenantRepository::new(state.pool());
    let services = ServiceRepository::new(state.pool());
    let staff_repo = StaffRepository::new(state.pool());

    let tenant = tenants
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("company {slug}")))?;

    let tenant_services = services.list_for_tenant(tenant.id).await?;

    let mut staff = Vec::new();
    for member in staff_repo.list_for_tenant(tenant.id).await? {
        let shifts = staff_repo.shifts(member.id).await?;
        let qualified = services.list_for_staff(member.id).await?;

        staff.push(StaffInfo {
            id: member.id,
            name: member.name,
            shifts: shifts.iter().map(ShiftInfo::from).collect(),
            services: qualified,
        });
    }

    Ok(Json(CompanyInfo {
        name: tenant.name,
        contact: tenant.contact,
        services: tenant_services,
        staff,
    }))
}
