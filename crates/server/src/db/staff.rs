//! Staff, shift, and qualification repository.

use sqlx::PgPool;

use turnera_core::{ServiceId, StaffId, TenantId};

use super::RepositoryError;
use crate::models::{Shift, Staff};

/// Repository for staff database operations.
pub struct StaffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a staff member by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, staff_id: StaffId) -> Result<Option<Staff>, RepositoryError> {
        let staff = sqlx::query_as::<_, Staff>(
            r"
            SELECT id, tenant_id, name
            FROM staff
            WHERE id = $1
            ",
        )
        .bind(staff_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(staff)
    }

    /// Get a staff member by id, scoped to a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_tenant(
        &self,
        tenant_id: TenantId,
        staff_id: StaffId,
    ) -> Result<Option<Staff>, RepositoryError> {
        let staff = sqlx::query_as::<_, Staff>(
            r"
            SELECT id, tenant_id, name
            FROM staff
            WHERE id = $1 AND tenant_id = $2
            ",
        )
        .bind(staff_id)
        .bind(tenant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(staff)
    }

    /// List all staff members of a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<Staff>, RepositoryError> {
        let staff = sqlx::query_as::<_, Staff>(
            r"
            SELECT id, tenant_id, name
            FROM staff
            WHERE tenant_id = $1
            ORDER BY id
            ",
        )
        .bind(tenant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(staff)
    }

    /// List the staff members of a tenant qualified for a service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_qualified(
        &self,
        tenant_id: TenantId,
        service_id: ServiceId,
    ) -> Result<Vec<Staff>, RepositoryError> {
        let staff = sqlx::query_as::<_, Staff>(
            r"
            SELECT st.id, st.tenant_id, st.name
            FROM staff st
            JOIN staff_service ss ON ss.staff_id = st.id
            WHERE st.tenant_id = $1 AND ss.service_id = $2
            ORDER BY st.id
            ",
        )
        .bind(tenant_id)
        .bind(service_id)
        .fetch_all(self.pool)
        .await?;

        Ok(staff)
    }

    /// Whether a staff member is qualified for a service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_qualified(
        &self,
        staff_id: StaffId,
        service_id: ServiceId,
    ) -> Result<bool, RepositoryError> {
        let qualified = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM staff_service
                WHERE staff_id = $1 AND service_id = $2
            )
            ",
        )
        .bind(staff_id)
        .bind(service_id)
        .fetch_one(self.pool)
        .await?;

        Ok(qualified)
    }

    /// List all shifts of a staff member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn shifts(&self, staff_id: StaffId) -> Result<Vec<Shift>, RepositoryError> {
        let shifts = sqlx::query_as::<_, Shift>(
            r"
            SELECT id, staff_id, weekday, start_minute, end_minute
            FROM shift
            WHERE staff_id = $1
            ORDER BY id
            ",
        )
        .bind(staff_id)
        .fetch_all(self.pool)
        .await?;

        Ok(shifts)
    }

    /// Create a new staff member for a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<Staff, RepositoryError> {
        let staff = sqlx::query_as::<_, Staff>(
            r"
            INSERT INTO staff (tenant_id, name)
            VALUES ($1, $2)
            RETURNING id, tenant_id, name
            ",
        )
        .bind(tenant_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(staff)
    }

    /// Add a shift for a staff member.
    ///
    /// The weekday must already be canonicalized by the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// the schema checks on the minute columns).
    pub async fn add_shift(
        &self,
        staff_id: StaffId,
        weekday: &str,
        start_minute: i32,
        end_minute: i32,
    ) -> Result<Shift, RepositoryError> {
        let shift = sqlx::query_as::<_, Shift>(
            r"
            INSERT INTO shift (staff_id, weekday, start_minute, end_minute)
            VALUES ($1, $2, $3, $4)
            RETURNING id, staff_id, weekday, start_minute, end_minute
            ",
        )
        .bind(staff_id)
        .bind(weekday)
        .bind(start_minute)
        .bind(end_minute)
        .fetch_one(self.pool)
        .await?;

        Ok(shift)
    }

    /// Qualify a staff member for a service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the link already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_qualification(
        &self,
        staff_id: StaffId,
        service_id: ServiceId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO staff_service (staff_id, service_id)
            VALUES ($1, $2)
            ",
        )
        .bind(staff_id)
        .bind(service_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("staff already qualified".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }
}
