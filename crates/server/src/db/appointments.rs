//! Appointment repository.
//!
//! Inserts ride on the `appointment_no_overlap` exclusion constraint: when
//! two bookings for the same staff member and date race with overlapping
//! minute ranges, the database commits one and rejects the other with an
//! exclusion violation, which surfaces here as `RepositoryError::Conflict`.

use chrono::NaiveDate;
use sqlx::PgPool;

use turnera_core::{ServiceId, StaffId, TenantId};

use super::RepositoryError;
use crate::models::{Appointment, BookedSpan};

/// Column list shared by the `RETURNING` clauses below.
const APPOINTMENT_COLUMNS: &str = "id, tenant_id, service_id, staff_id, client_name, \
     national_id, email, phone, date, start_minute, end_minute, status, created_at";

/// Fields for a new appointment insert.
#[derive(Debug)]
pub struct NewAppointment<'a> {
    pub tenant_id: TenantId,
    pub service_id: ServiceId,
    pub staff_id: StaffId,
    pub client_name: &'a str,
    pub national_id: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
}

/// Repository for appointment database operations.
pub struct AppointmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active booked spans for one staff member across a date range
    /// (both endpoints inclusive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_spans_between(
        &self,
        staff_id: StaffId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BookedSpan>, RepositoryError> {
        let spans = sqlx::query_as::<_, BookedSpan>(
            r"
            SELECT date, start_minute, end_minute
            FROM appointment
            WHERE staff_id = $1 AND status = 'active' AND date >= $2 AND date <= $3
            ORDER BY date, start_minute
            ",
        )
        .bind(staff_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(spans)
    }

    /// Active booked spans for one staff member on one date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_spans_on(
        &self,
        staff_id: StaffId,
        date: NaiveDate,
    ) -> Result<Vec<BookedSpan>, RepositoryError> {
        self.active_spans_between(staff_id, date, date).await
    }

    /// Insert a new active appointment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the exclusion constraint
    /// rejects an overlapping active appointment (the losing side of a
    /// concurrent booking race lands here too).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewAppointment<'_>) -> Result<Appointment, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO appointment
                (tenant_id, service_id, staff_id, client_name, national_id,
                 email, phone, date, start_minute, end_minute, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'active')
            RETURNING {APPOINTMENT_COLUMNS}
            "
        );

        sqlx::query_as::<_, Appointment>(&query)
            .bind(new.tenant_id)
            .bind(new.service_id)
            .bind(new.staff_id)
            .bind(new.client_name)
            .bind(new.national_id)
            .bind(new.email)
            .bind(new.phone)
            .bind(new.date)
            .bind(new.start_minute)
            .bind(new.end_minute)
            .fetch_one(self.pool)
            .await
            .map_err(map_overlap_violation)
    }

    /// Cancel the unique active appointment matching (national id, date,
    /// start time).
    ///
    /// Returns `None` when no active appointment matches - a repeat call
    /// for an already-cancelled appointment lands there, never on a second
    /// success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn cancel_active(
        &self,
        national_id: &str,
        date: NaiveDate,
        start_minute: i32,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let query = format!(
            r"
            UPDATE appointment
            SET status = 'cancelled'
            WHERE id = (
                SELECT id FROM appointment
                WHERE national_id = $1 AND date = $2 AND start_minute = $3
                      AND status = 'active'
                ORDER BY id
                LIMIT 1
            )
            RETURNING {APPOINTMENT_COLUMNS}
            "
        );

        let cancelled = sqlx::query_as::<_, Appointment>(&query)
            .bind(national_id)
            .bind(date)
            .bind(start_minute)
            .fetch_optional(self.pool)
            .await?;

        Ok(cancelled)
    }

    /// Appointment counts per "YYYY-M" month label for a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_month(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<(String, i64)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT to_char(date, 'YYYY-FMMM') AS label, COUNT(*)
            FROM appointment
            WHERE tenant_id = $1
            GROUP BY label
            ORDER BY min(date)
            ",
        )
        .bind(tenant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Appointment counts per staff name for a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_staff(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<(String, i64)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT st.name, COUNT(*)
            FROM appointment a
            JOIN staff st ON st.id = a.staff_id
            WHERE a.tenant_id = $1
            GROUP BY st.name
            ORDER BY COUNT(*) DESC, st.name
            ",
        )
        .bind(tenant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Appointment counts per service name for a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_service(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<(String, i64)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT sv.name, COUNT(*)
            FROM appointment a
            JOIN service sv ON sv.id = a.service_id
            WHERE a.tenant_id = $1
            GROUP BY sv.name
            ORDER BY COUNT(*) DESC, sv.name
            ",
        )
        .bind(tenant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Appointment counts per day ("DD/MM/YYYY") since a cutoff date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_day_since(
        &self,
        tenant_id: TenantId,
        since: NaiveDate,
    ) -> Result<Vec<(String, i64)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT to_char(date, 'DD/MM/YYYY'), COUNT(*)
            FROM appointment
            WHERE tenant_id = $1 AND date >= $2
            GROUP BY date
            ORDER BY date
            ",
        )
        .bind(tenant_id)
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// Map unique/exclusion violations onto `RepositoryError::Conflict`.
///
/// Postgres reports the overlap exclusion constraint as SQLSTATE 23P01,
/// which sqlx does not classify as a unique violation.
fn map_overlap_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && (db_err.is_unique_violation() || db_err.code().as_deref() == Some("23P01"))
    {
        return RepositoryError::Conflict("overlapping active appointment".to_owned());
    }
    RepositoryError::Database(e)
}
