//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`.
//!
//! The externally visible error kinds follow the booking domain:
//! validation (400, caller must fix the input), not-found (404, fix the
//! reference), conflict (409, retryable against another slot or staff
//! member), and internal (500, details never exposed). Malformed stored
//! time data is internal - it should not survive input validation, so it
//! is logged and captured rather than blamed on the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use turnera_core::schedule::TimeFormatError;

use crate::db::RepositoryError;
use crate::services::{AvailabilityError, BookingError};

/// Application-level error type for the booking API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Availability aggregation failed.
    #[error("Availability error: {0}")]
    Availability(#[from] AvailabilityError),

    /// Booking or cancellation failed.
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflicting state (duplicate slug, overlapping appointment, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored time data failed to parse.
    #[error("Time format error: {0}")]
    TimeFormat(#[from] TimeFormatError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status_code();

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.client_message()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl AppError {
    /// Whether this error is the server's fault (and worth capturing).
    fn is_server_error(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// HTTP status for this error.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(err) => repository_status(err),
            Self::Availability(err) => match err {
                AvailabilityError::TenantNotFound
                | AvailabilityError::ServiceNotFound
                | AvailabilityError::StaffNotFound
                | AvailabilityError::NotQualified => StatusCode::NOT_FOUND,
                AvailabilityError::Repository(err) => repository_status(err),
            },
            Self::Booking(err) => match err {
                BookingError::MissingField(_)
                | BookingError::InvalidEmail
                | BookingError::InvalidTime(_) => StatusCode::BAD_REQUEST,
                BookingError::TenantNotFound
                | BookingError::ServiceNotFound
                | BookingError::StaffNotFound
                | BookingError::NotQualified
                | BookingError::AppointmentNotFound => StatusCode::NOT_FOUND,
                BookingError::SlotUnavailable | BookingError::NoStaffAvailable => {
                    StatusCode::CONFLICT
                }
                BookingError::Repository(err) => repository_status(err),
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TimeFormat(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to clients for non-500 responses.
    fn client_message(&self) -> String {
        match self {
            Self::Availability(err) => err.to_string(),
            Self::Booking(err) => match err {
                // A losing booking race surfaces like a synchronous conflict
                BookingError::Repository(RepositoryError::Conflict(_)) => {
                    BookingError::SlotUnavailable.to_string()
                }
                other => other.to_string(),
            },
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Validation(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Status for a repository error, wherever it is nested.
fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("tenant tamanaco-spa".to_string());
        assert_eq!(err.to_string(), "Not found: tenant tamanaco-spa");

        let err = AppError::Validation("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_booking_error_status_codes() {
        assert_eq!(
            get_status(AppError::Booking(BookingError::MissingField("email"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Booking(BookingError::TenantNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Booking(BookingError::SlotUnavailable)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Booking(BookingError::NoStaffAvailable)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Booking(BookingError::AppointmentNotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_losing_race_maps_to_conflict() {
        // The exclusion-constraint loser must look like a synchronous conflict
        let err = AppError::Booking(BookingError::Repository(RepositoryError::Conflict(
            "overlapping active appointment".to_owned(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_stored_time_corruption_is_internal() {
        let err = AppError::TimeFormat(TimeFormatError::Malformed {
            input: "99:99".to_owned(),
        });
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
