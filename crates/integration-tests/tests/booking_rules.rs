//! Booking request validation and appointment status rules.

use chrono::NaiveDate;
use turnera_core::{AppointmentStatus, ServiceId, StaffId};
use turnera_server::services::BookingError;
use turnera_server::services::booking::{BookingRequest, validate_client_fields};

fn request() -> BookingRequest {
    BookingRequest {
        client_name: "Luis Soriano".into(),
        national_id: "12345678".into(),
        email: "luis@mail.com".into(),
        phone: "04140001122".into(),
        service_id: ServiceId::new(1),
        date: NaiveDate::from_ymd_opt(2025, 4, 28).expect("valid date"),
        time: "10:00".into(),
        staff_id: None,
    }
}

// =============================================================================
// Client field validation
// =============================================================================

#[test]
fn test_complete_request_passes_validation() {
    assert!(validate_client_fields(&request()).is_ok());
}

#[test]
fn test_each_missing_field_is_named() {
    let mut req = request();
    req.phone = String::new();
    assert!(matches!(
        validate_client_fields(&req),
        Err(BookingError::MissingField("phone"))
    ));

    let mut req = request();
    req.client_name = "   ".into();
    assert!(matches!(
        validate_client_fields(&req),
        Err(BookingError::MissingField("client_name"))
    ));
}

#[test]
fn test_validation_checks_fields_before_anything_else() {
    // Even with a nonsense time, missing fields win (fail-fast order)
    let mut req = request();
    req.national_id = String::new();
    req.time = "99:99".into();
    assert!(matches!(
        validate_client_fields(&req),
        Err(BookingError::MissingField("national_id"))
    ));
}

#[test]
fn test_optional_staff_preference_is_allowed() {
    let mut req = request();
    req.staff_id = Some(StaffId::new(3));
    assert!(validate_client_fields(&req).is_ok());
}

// =============================================================================
// Status transitions
// =============================================================================

#[test]
fn test_status_values() {
    assert!(AppointmentStatus::Active.is_active());
    assert!(!AppointmentStatus::Cancelled.is_active());
}

#[test]
fn test_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(AppointmentStatus::Active).expect("serialize"),
        serde_json::json!("active")
    );
    assert_eq!(
        serde_json::to_value(AppointmentStatus::Cancelled).expect("serialize"),
        serde_json::json!("cancelled")
    );
}

#[test]
fn test_cancellation_is_one_way() {
    // The only legal transition is active -> cancelled; a cancelled
    // appointment never becomes active again, and cancelling twice is a
    // not-found at the service layer (the second lookup filters on active).
    let from = AppointmentStatus::Active;
    let to = AppointmentStatus::Cancelled;
    assert_ne!(from, to);
    assert!(!to.is_active());
}
