//! HTTP route handlers for the booking API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                  - Liveness check
//! GET  /health/ready                            - Readiness check (DB ping)
//!
//! # Public (per tenant, addressed by slug)
//! GET  /companies/{slug}                        - Tenant info: services, staff, shifts
//! GET  /companies/{slug}/availability           - Bookable slots (15-day window)
//!                                                 ?service_id=&staff_id=
//! POST /companies/{slug}/appointments           - Book an appointment
//! POST /companies/{slug}/appointments/cancel    - Cancel an appointment
//!
//! # Admin (shared token via x-admin-token header)
//! POST /admin/tenants                           - Create tenant
//! POST /admin/tenants/{slug}/services           - Create service
//! POST /admin/tenants/{slug}/staff              - Create staff member
//! POST /admin/staff/{id}/shifts                 - Add a shift
//! POST /admin/staff/{id}/services/{service_id}  - Qualify staff for service
//! GET  /admin/tenants/{slug}/stats/monthly      - Appointments per month
//! GET  /admin/tenants/{slug}/stats/by-staff     - Appointments per staff member
//! GET  /admin/tenants/{slug}/stats/by-service   - Appointments per service
//! GET  /admin/tenants/{slug}/stats/daily        - Appointments per day (?days=7)
//! ```

pub mod admin;
pub mod availability;
pub mod booking;
pub mod company;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the public company routes router.
pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(company::show))
        .route("/{slug}/availability", get(availability::show))
        .route("/{slug}/appointments", post(booking::create))
        .route("/{slug}/appointments/cancel", post(booking::cancel))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/tenants", post(admin::create_tenant))
        .route("/tenants/{slug}/services", post(admin::create_service))
        .route("/tenants/{slug}/staff", post(admin::create_staff))
        .route("/staff/{id}/shifts", post(admin::add_shift))
        .route(
            "/staff/{id}/services/{service_id}",
            post(admin::add_qualification),
        )
        .route("/tenants/{slug}/stats/monthly", get(admin::stats_monthly))
        .route("/tenants/{slug}/stats/by-staff", get(admin::stats_by_staff))
        .route(
            "/tenants/{slug}/stats/by-service",
            get(admin::stats_by_service),
        )
        .route("/tenants/{slug}/stats/daily", get(admin::stats_daily))
}

/// Create all routes for the booking API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/companies", company_routes())
        .nest("/admin", admin_routes())
}

/// Parse a path slug, rejecting malformed values as a client error.
pub(crate) fn parse_slug(raw: &str) -> Result<turnera_core::Slug, crate::error::AppError> {
    turnera_core::Slug::parse(raw)
        .map_err(|e| crate::error::AppError::Validation(format!("invalid slug: {e}")))
}
