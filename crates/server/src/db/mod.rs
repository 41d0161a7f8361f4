//! Database access for the booking API.
//!
//! # Tables
//!
//! - `tenant` - Business accounts, addressed by slug
//! - `service` - Bookable services with duration and price
//! - `staff` / `shift` / `staff_service` - Staff, working hours, qualifications
//! - `appointment` - Bookings, guarded by the overlap exclusion constraint
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p turnera-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod appointments;
pub mod services;
pub mod staff;
pub mod tenants;

pub use appointments::AppointmentRepository;
pub use services::ServiceRepository;
pub use staff::StaffRepository;
pub use tenants::TenantRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique slug, overlapping appointment, ...).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
