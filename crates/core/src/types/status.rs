//! Appointment status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an appointment.
///
/// The only transition is `Active` -> `Cancelled`; appointments are never
/// hard-deleted by the booking flow. Only `Active` appointments count as
/// busy time for availability and conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "appointment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Active,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether this status occupies the staff member's time.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid appointment status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_roundtrip() {
        for status in [AppointmentStatus::Active, AppointmentStatus::Cancelled] {
            let parsed: AppointmentStatus = status.to_string().parse().expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_only_active_is_busy() {
        assert!(AppointmentStatus::Active.is_active());
        assert!(!AppointmentStatus::Cancelled.is_active());
    }

    #[test]
    fn test_invalid_status() {
        assert!("deleted".parse::<AppointmentStatus>().is_err());
    }
}
