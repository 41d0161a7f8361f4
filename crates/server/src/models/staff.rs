//! Staff and shift models.

use serde::Serialize;

use turnera_core::schedule::{Interval, Weekday};
use turnera_core::{ShiftId, StaffId, TenantId};

/// A staff member employed by a tenant.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Staff {
    pub id: StaffId,
    pub tenant_id: TenantId,
    pub name: String,
}

/// A working-hour window for one weekday.
///
/// `weekday` is the stored day name and may carry accent/encoding variants;
/// use [`Shift::is_on`] rather than comparing the raw string.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Shift {
    pub id: ShiftId,
    pub staff_id: StaffId,
    pub weekday: String,
    pub start_minute: i32,
    pub end_minute: i32,
}

impl Shift {
    /// The shift window as an engine interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval::new(
            super::minute_of_day(self.start_minute),
            super::minute_of_day(self.end_minute),
        )
    }

    /// Whether this shift falls on the given weekday.
    #[must_use]
    pub fn is_on(&self, weekday: Weekday) -> bool {
        weekday.matches_stored(&self.weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(weekday: &str, start: i32, end: i32) -> Shift {
        Shift {
            id: ShiftId::new(1),
            staff_id: StaffId::new(1),
            weekday: weekday.to_owned(),
            start_minute: start,
            end_minute: end,
        }
    }

    #[test]
    fn test_interval_conversion() {
        let s = shift("lunes", 480, 780);
        assert_eq!(s.interval(), Interval::new(480, 780));
    }

    #[test]
    fn test_is_on_tolerates_stored_variants() {
        assert!(shift("miercoles", 480, 780).is_on(Weekday::Wednesday));
        assert!(shift("Miércoles", 480, 780).is_on(Weekday::Wednesday));
        assert!(!shift("martes", 480, 780).is_on(Weekday::Wednesday));
    }
}
