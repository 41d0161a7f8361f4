//! Tenant model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use turnera_core::{Slug, TenantId};

/// An isolated business account, identified publicly by its slug.
///
/// Display fields (`name`, `contact`) may change after creation; the slug
/// and id are stable once bookings reference them.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: TenantId,
    pub slug: Slug,
    pub name: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}
