//! Integration tests for Turnera.
//!
//! # Test Categories
//!
//! - `engine_scenarios` - End-to-end walks through the scheduling engine
//!   (shift + busy set -> free intervals -> slot grid)
//! - `availability_logic` - Window and dedup behavior of the availability
//!   aggregator
//! - `booking_rules` - Request validation and status-transition rules
//!
//! Tests here exercise the logic layers without a live database; booking
//! paths that need the exclusion constraint (concurrent double-booking)
//! require a `PostgreSQL` instance with the migrations applied and are
//! covered by the constraint itself.
