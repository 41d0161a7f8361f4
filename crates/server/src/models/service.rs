//! Service model.

use rust_decimal::Decimal;
use serde::Serialize;

use turnera_core::{ServiceId, TenantId};

/// A bookable service offered by a tenant.
///
/// `duration_minutes` is the scheduling granularity for this service.
/// Changing it does not move existing appointments - their occupied
/// interval is fixed at booking time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: ServiceId,
    pub tenant_id: TenantId,
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
}

impl Service {
    /// Duration as an engine minute value.
    #[must_use]
    pub fn duration(&self) -> u16 {
        super::minute_of_day(self.duration_minutes)
    }
}
