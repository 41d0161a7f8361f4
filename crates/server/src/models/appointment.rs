//! Appointment models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use turnera_core::schedule::{Interval, from_minutes};
use turnera_core::{AppointmentId, AppointmentStatus, ServiceId, StaffId, TenantId};

/// A booked appointment.
///
/// The occupied interval `[start_minute, end_minute)` is fixed at booking
/// time from the appointment's own service duration. Status only ever moves
/// `active` -> `cancelled`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: AppointmentId,
    pub tenant_id: TenantId,
    pub service_id: ServiceId,
    pub staff_id: StaffId,
    pub client_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Start time as "HH:MM".
    #[must_use]
    pub fn start_time(&self) -> String {
        from_minutes(super::minute_of_day(self.start_minute))
    }

    /// End time as "HH:MM".
    #[must_use]
    pub fn end_time(&self) -> String {
        from_minutes(super::minute_of_day(self.end_minute))
    }

    /// The occupied interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval::new(
            super::minute_of_day(self.start_minute),
            super::minute_of_day(self.end_minute),
        )
    }
}

/// A booked interval row for availability computation: just the date and
/// the occupied minutes, without client details.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct BookedSpan {
    pub date: NaiveDate,
    pub start_minute: i32,
    pub end_minute: i32,
}

impl BookedSpan {
    /// The occupied interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval::new(
            super::minute_of_day(self.start_minute),
            super::minute_of_day(self.end_minute),
        )
    }
}
