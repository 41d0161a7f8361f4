//! Service repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use turnera_core::{ServiceId, StaffId, TenantId};

use super::RepositoryError;
use crate::models::Service;

/// Repository for service database operations.
pub struct ServiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new service repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a service by id, scoped to a tenant.
    ///
    /// Scoping to the tenant in the query keeps one tenant's service ids
    /// unusable against another tenant's slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_tenant(
        &self,
        tenant_id: TenantId,
        service_id: ServiceId,
    ) -> Result<Option<Service>, RepositoryError> {
        let service = sqlx::query_as::<_, Service>(
            r"
            SELECT id, tenant_id, name, duration_minutes, price
            FROM service
            WHERE id = $1 AND tenant_id = $2
            ",
        )
        .bind(service_id)
        .bind(tenant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(service)
    }

    /// List all services offered by a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<Service>, RepositoryError> {
        let services = sqlx::query_as::<_, Service>(
            r"
            SELECT id, tenant_id, name, duration_minutes, price
            FROM service
            WHERE tenant_id = $1
            ORDER BY id
            ",
        )
        .bind(tenant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(services)
    }

    /// List the services a staff member is qualified to perform.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_staff(
        &self,
        staff_id: StaffId,
    ) -> Result<Vec<Service>, RepositoryError> {
        let services = sqlx::query_as::<_, Service>(
            r"
            SELECT sv.id, sv.tenant_id, sv.name, sv.duration_minutes, sv.price
            FROM service sv
            JOIN staff_service ss ON ss.service_id = sv.id
            WHERE ss.staff_id = $1
            ORDER BY sv.id
            ",
        )
        .bind(staff_id)
        .fetch_all(self.pool)
        .await?;

        Ok(services)
    }

    /// Create a new service for a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// the schema check on `duration_minutes`).
    pub async fn create(
        &self,
        tenant_id: TenantId,
        name: &str,
        duration_minutes: i32,
        price: Decimal,
    ) -> Result<Service, RepositoryError> {
        let service = sqlx::query_as::<_, Service>(
            r"
            INSERT INTO service (tenant_id, name, duration_minutes, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tenant_id, name, duration_minutes, price
            ",
        )
        .bind(tenant_id)
        .bind(name)
        .bind(duration_minutes)
        .bind(price)
        .fetch_one(self.pool)
        .await?;

        Ok(service)
    }
}
