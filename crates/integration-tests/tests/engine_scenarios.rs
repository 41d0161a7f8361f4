//! End-to-end scheduling engine scenarios.
//!
//! Each test walks the full engine path a request would take: stored shift
//! windows and appointment intervals in, bookable "HH:MM" slot starts out.

use turnera_core::schedule::{
    Interval, Weekday, candidate_slots, day_slots, free_intervals, from_minutes, slot_fits,
    to_minutes,
};

/// Build an interval from "HH:MM" strings, as stored data would arrive.
fn iv(start: &str, end: &str) -> Interval {
    Interval::new(
        to_minutes(start).expect("valid start"),
        to_minutes(end).expect("valid end"),
    )
}

fn times(slots: &[u16]) -> Vec<String> {
    slots.iter().map(|&s| from_minutes(s)).collect()
}

// =============================================================================
// Slot-grid scenarios
// =============================================================================

#[test]
fn test_morning_shift_with_one_appointment() {
    // Shift 08:00-13:00, one active appointment at 09:00 for 30 minutes,
    // service duration 30, grid 30. 09:00 is excluded; 08:30 is included
    // because 08:30 + 30 ends exactly when the appointment starts.
    let shift = iv("08:00", "13:00");
    let busy = [iv("09:00", "09:30")];

    let slots = times(&candidate_slots(shift, &busy, 30));

    assert_eq!(
        slots,
        vec![
            "08:00", "08:30", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30"
        ]
    );
}

#[test]
fn test_short_shift_long_service() {
    // Shift 08:00-09:00 with a 45-minute service: 08:00 + 45 = 08:45 fits,
    // 08:30 + 45 = 09:15 does not. Exactly one slot.
    let slots = candidate_slots(iv("08:00", "09:00"), &[], 45);
    assert_eq!(times(&slots), vec!["08:00"]);
}

#[test]
fn test_fully_booked_shift_has_no_slots() {
    let shift = iv("08:00", "12:00");
    let busy = [iv("08:00", "10:00"), iv("10:00", "12:00")];
    assert!(candidate_slots(shift, &busy, 30).is_empty());
}

#[test]
fn test_generated_slots_never_conflict() {
    // Property: every generated slot fits the shift and misses every busy
    // interval, for a messy (unsorted, overlapping) busy set.
    let shift = iv("09:00", "18:00");
    let busy = [
        iv("12:15", "13:00"),
        iv("10:00", "10:40"),
        iv("10:30", "11:00"),
        iv("17:50", "19:00"),
    ];

    for duration in [20u16, 30, 45, 60] {
        for start in candidate_slots(shift, &busy, duration) {
            let slot = Interval::new(start, start + duration);
            assert!(shift.contains(slot));
            assert!(busy.iter().all(|b| !slot.overlaps(*b)));
        }
    }
}

#[test]
fn test_free_intervals_partition_the_shift() {
    let shift = iv("08:00", "16:00");
    let busy = [iv("09:00", "09:45"), iv("12:00", "13:30")];

    let free = free_intervals(shift, &busy);
    let free_len: u16 = free.iter().map(|i| i.duration()).sum();
    let busy_len: u16 = busy.iter().map(|i| i.duration()).sum();

    assert_eq!(free_len + busy_len, shift.duration());
}

// =============================================================================
// Weekday scenarios
// =============================================================================

#[test]
fn test_no_shift_on_requested_weekday_means_no_slots() {
    // Staff works Mondays only; the request lands on a Tuesday.
    let date = chrono::NaiveDate::from_ymd_opt(2025, 4, 29).expect("valid date");
    let weekday = Weekday::from_date(date);
    assert_eq!(weekday, Weekday::Tuesday);

    let stored_shifts = [("lunes", iv("08:00", "13:00"))];
    let day_windows: Vec<Interval> = stored_shifts
        .iter()
        .filter(|(day, _)| weekday.matches_stored(day))
        .map(|(_, window)| *window)
        .collect();

    // Availability: the date contributes nothing
    assert!(day_slots(&day_windows, &[], 30).is_empty());
    // Explicit booking against that day: the overlap test rejects it
    assert!(!slot_fits(&day_windows, &[], iv("09:00", "09:30")));
}

#[test]
fn test_stored_day_name_variants_still_match() {
    // The same Wednesday shift stored three ways: plain, precomposed
    // accent, combining mark. All must match the computed weekday.
    let date = chrono::NaiveDate::from_ymd_opt(2025, 4, 30).expect("valid date");
    let weekday = Weekday::from_date(date);
    assert_eq!(weekday, Weekday::Wednesday);

    for stored in ["miercoles", "miércoles", "mie\u{0301}rcoles", "MIÉRCOLES"] {
        assert!(weekday.matches_stored(stored), "variant {stored:?} must match");
    }
}

// =============================================================================
// Direct booking checks
// =============================================================================

#[test]
fn test_explicit_booking_back_to_back() {
    // A requested slot ending exactly at an appointment start (and one
    // starting exactly at an appointment end) are both fine.
    let shifts = [iv("08:00", "13:00")];
    let busy = [iv("09:00", "09:30")];

    assert!(slot_fits(&shifts, &busy, iv("08:30", "09:00")));
    assert!(slot_fits(&shifts, &busy, iv("09:30", "10:00")));
    assert!(!slot_fits(&shifts, &busy, iv("08:45", "09:15")));
}

#[test]
fn test_explicit_booking_off_grid_time_can_still_fit() {
    // The direct check is an overlap test, not slot enumeration: an
    // off-grid request that fits is accepted.
    let shifts = [iv("08:00", "13:00")];
    assert!(slot_fits(&shifts, &[], iv("08:10", "08:40")));
}

#[test]
fn test_explicit_booking_crossing_shift_end_rejected() {
    let shifts = [iv("08:00", "13:00")];
    assert!(!slot_fits(&shifts, &[], iv("12:45", "13:15")));
}
