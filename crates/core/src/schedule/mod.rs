//! Availability and conflict-resolution engine.
//!
//! Everything in this module works on minutes-of-day (`u16`) and calendar
//! dates; nothing here touches a clock, a locale, or a database. The server
//! crate feeds it shift windows and busy intervals fetched from storage and
//! turns the results into API responses.
//!
//! # Modules
//!
//! - [`time`] - "HH:MM" conversion, weekday canonicalization, day-name
//!   normalization
//! - [`interval`] - half-open minute intervals and the free-interval sweep
//! - [`slots`] - slot-grid generation over free intervals

pub mod interval;
pub mod slots;
pub mod time;

pub use interval::{Interval, free_intervals};
pub use slots::{SLOT_GRID_MINUTES, candidate_slots, day_slots, slot_fits};
pub use time::{TimeFormatError, Weekday, from_minutes, normalize_day_name, to_minutes};
