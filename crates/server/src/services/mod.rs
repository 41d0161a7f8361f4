//! Business services composing repositories with the scheduling engine.

pub mod availability;
pub mod booking;

pub use availability::{AvailabilityError, AvailabilityService, DayAvailability, SlotEntry};
pub use booking::{BookingConfirmation, BookingError, BookingService};
