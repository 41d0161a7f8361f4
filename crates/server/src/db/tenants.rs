//! Tenant repository.

use sqlx::PgPool;

use turnera_core::Slug;

use super::RepositoryError;
use crate::models::Tenant;

/// Repository for tenant database operations.
pub struct TenantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TenantRepository<'a> {
    /// Create a new tenant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a tenant by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Option<Tenant>, RepositoryError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r"
            SELECT id, slug, name, contact, created_at
            FROM tenant
            WHERE slug = $1
            ",
        )
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(tenant)
    }

    /// Create a new tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        slug: &Slug,
        name: &str,
        contact: &str,
    ) -> Result<Tenant, RepositoryError> {
        sqlx::query_as::<_, Tenant>(
            r"
            INSERT INTO tenant (slug, name, contact)
            VALUES ($1, $2, $3)
            RETURNING id, slug, name, contact, created_at
            ",
        )
        .bind(slug.as_str())
        .bind(name)
        .bind(contact)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })
    }
}
