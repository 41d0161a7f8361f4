//! Domain models backed by the database schema.
//!
//! Minute-of-day columns are stored as `INTEGER` and constrained to
//! 0..=1440 by schema checks; the helpers here convert them into the
//! engine's `u16` currency.

pub mod appointment;
pub mod service;
pub mod staff;
pub mod tenant;

pub use appointment::{Appointment, BookedSpan};
pub use service::Service;
pub use staff::{Shift, Staff};
pub use tenant::Tenant;

/// Narrow a schema-checked minute column to a minute-of-day value.
pub(crate) fn minute_of_day(raw: i32) -> u16 {
    u16::try_from(raw.clamp(0, 1440)).unwrap_or(1440)
}
