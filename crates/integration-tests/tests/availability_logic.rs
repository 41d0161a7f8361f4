//! Availability aggregator window and dedup behavior.

use chrono::NaiveDate;
use turnera_core::StaffId;
use turnera_server::services::availability::{
    AVAILABILITY_WINDOW_DAYS, collapse_slots, rolling_window, staff_slots,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_window_is_fifteen_days_inclusive() {
    let window = rolling_window(date(2025, 4, 28), AVAILABILITY_WINDOW_DAYS);
    assert_eq!(window.len(), 15);
    assert_eq!(window.first().copied(), Some(date(2025, 4, 28)));
    assert_eq!(window.last().copied(), Some(date(2025, 5, 12)));
}

#[test]
fn test_window_crosses_month_boundaries() {
    let window = rolling_window(date(2025, 12, 25), AVAILABILITY_WINDOW_DAYS);
    assert_eq!(window.last().copied(), Some(date(2026, 1, 8)));
}

#[test]
fn test_collapsed_slots_hide_staff_identity() {
    let a = StaffId::new(1);
    let b = StaffId::new(2);

    // Two staff members share 09:00; the client sees it once, anonymously
    let slots = collapse_slots(vec![(540, a), (540, b), (480, a)]);

    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| s.staff_id.is_none()));
    assert_eq!(slots[0].time, "08:00");
    assert_eq!(slots[1].time, "09:00");
}

#[test]
fn test_collapsed_slot_serializes_without_staff_field() {
    let slots = collapse_slots(vec![(480, StaffId::new(1))]);
    let json = serde_json::to_value(&slots[0]).expect("serialize");
    assert_eq!(json, serde_json::json!({ "time": "08:00" }));
}

#[test]
fn test_staff_slots_keep_identity_and_order() {
    let a = StaffId::new(1);
    let slots = staff_slots(vec![(600, a), (480, a), (540, a)]);

    let times: Vec<&str> = slots.iter().map(|s| s.time.as_str()).collect();
    assert_eq!(times, ["08:00", "09:00", "10:00"]);
    assert!(slots.iter().all(|s| s.staff_id == Some(a)));
}

#[test]
fn test_staff_slot_serializes_with_staff_field() {
    let slots = staff_slots(vec![(480, StaffId::new(7))]);
    let json = serde_json::to_value(&slots[0]).expect("serialize");
    assert_eq!(json, serde_json::json!({ "time": "08:00", "staff_id": 7 }));
}
