//! Booking assigner and cancellation.
//!
//! Validates a booking request, picks (or checks) a conflict-free staff
//! member, and records the appointment. The overlap check here gives
//! friendly synchronous errors; the database exclusion constraint is the
//! real arbiter when two requests race, and the loser surfaces the same
//! conflict outcome. No automatic retries - the caller re-requests against
//! another slot.

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use turnera_core::schedule::{Interval, TimeFormatError, Weekday, slot_fits, to_minutes};
use turnera_core::{ServiceId, Slug, StaffId};

use crate::db::appointments::NewAppointment;
use crate::db::{
    AppointmentRepository, RepositoryError, ServiceRepository, StaffRepository, TenantRepository,
};
use crate::models::{Appointment, Service, Shift, Staff, Tenant};

/// Errors from booking and cancellation.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A required client field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The client email is not plausibly an email address.
    #[error("invalid email address")]
    InvalidEmail,
    /// The requested time string is not a valid "HH:MM" time.
    #[error("invalid time: {0}")]
    InvalidTime(#[from] TimeFormatError),
    /// No tenant with the requested slug.
    #[error("tenant not found")]
    TenantNotFound,
    /// The service does not exist or belongs to another tenant.
    #[error("service not found")]
    ServiceNotFound,
    /// The staff member does not exist or belongs to another tenant.
    #[error("staff member not found")]
    StaffNotFound,
    /// The staff member is not qualified for the service.
    #[error("staff member is not qualified for this service")]
    NotQualified,
    /// The requested slot is outside the staff member's shifts or overlaps
    /// an existing appointment.
    #[error("requested time is not available for this staff member")]
    SlotUnavailable,
    /// No qualified staff member is free at the requested time.
    #[error("no staff available at the requested time")]
    NoStaffAvailable,
    /// No active appointment matches the cancellation request.
    #[error("appointment not found")]
    AppointmentNotFound,
    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A booking request, as accepted by the public API.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub client_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: String,
    pub staff_id: Option<StaffId>,
}

/// A created appointment with its context resolved for confirmation.
#[derive(Debug)]
pub struct BookingConfirmation {
    pub appointment: Appointment,
    pub tenant: Tenant,
    pub service: Service,
    pub staff: Staff,
}

/// Booking service.
pub struct BookingService<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingService<'a> {
    /// Create a new booking service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Book an appointment.
    ///
    /// Validation runs in order, each failure with a distinct outcome:
    /// client fields -> tenant -> service -> (optional) staff existence and
    /// qualification -> schedule fit. With no staff requested, one is chosen
    /// uniformly at random among all conflict-free qualified staff.
    ///
    /// # Errors
    ///
    /// Returns `BookingError` describing the first failed validation, a
    /// scheduling conflict, or a repository failure.
    #[instrument(skip(self, request), fields(slug = %slug, service_id = %request.service_id, date = %request.date))]
    pub async fn book(
        &self,
        slug: &Slug,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        validate_client_fields(request)?;

        let start = to_minutes(&request.time)?;

        let tenants = TenantRepository::new(self.pool);
        let services = ServiceRepository::new(self.pool);
        let staff_repo = StaffRepository::new(self.pool);
        let appointments = AppointmentRepository::new(self.pool);

        let tenant = tenants
            .get_by_slug(slug)
            .await?
            .ok_or(BookingError::TenantNotFound)?;
        let service = services
            .get_for_tenant(tenant.id, request.service_id)
            .await?
            .ok_or(BookingError::ServiceNotFound)?;

        let slot = Interval::new(start, start + service.duration());
        let weekday = Weekday::from_date(request.date);

        let chosen = match request.staff_id {
            Some(id) => {
                let member = staff_repo
                    .get_for_tenant(tenant.id, id)
                    .await?
                    .ok_or(BookingError::StaffNotFound)?;
                if !staff_repo.is_qualified(id, request.service_id).await? {
                    return Err(BookingError::NotQualified);
                }
                if !self
                    .staff_is_free(&staff_repo, &appointments, id, weekday, request.date, slot)
                    .await?
                {
                    return Err(BookingError::SlotUnavailable);
                }
                member
            }
            None => {
                let candidates = staff_repo
                    .list_qualified(tenant.id, request.service_id)
                    .await?;

                let mut free = Vec::new();
                for member in candidates {
                    if self
                        .staff_is_free(
                            &staff_repo,
                            &appointments,
                            member.id,
                            weekday,
                            request.date,
                            slot,
                        )
                        .await?
                    {
                        free.push(member);
                    }
                }

                // Uniform random pick spreads load across the free staff
                free.choose(&mut rand::rng())
                    .cloned()
                    .ok_or(BookingError::NoStaffAvailable)?
            }
        };

        let appointment = appointments
            .create(NewAppointment {
                tenant_id: tenant.id,
                service_id: service.id,
                staff_id: chosen.id,
                client_name: request.client_name.trim(),
                national_id: request.national_id.trim(),
                email: request.email.trim(),
                phone: request.phone.trim(),
                date: request.date,
                start_minute: i32::from(slot.start),
                end_minute: i32::from(slot.end),
            })
            .await?;

        tracing::info!(
            appointment_id = %appointment.id,
            staff_id = %chosen.id,
            "appointment booked"
        );

        Ok(BookingConfirmation {
            appointment,
            tenant,
            service,
            staff: chosen,
        })
    }

    /// Cancel the active appointment matching (national id, date, time).
    ///
    /// Cancellation is not idempotent-success: a second call for the same
    /// appointment reports not-found.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::AppointmentNotFound` when nothing matches,
    /// `BookingError` validation variants on bad input, or a repository
    /// failure.
    #[instrument(skip(self, national_id))]
    pub async fn cancel(
        &self,
        national_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<Appointment, BookingError> {
        if national_id.trim().is_empty() {
            return Err(BookingError::MissingField("national_id"));
        }

        let start = to_minutes(time)?;

        let cancelled = AppointmentRepository::new(self.pool)
            .cancel_active(national_id.trim(), date, i32::from(start))
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        tracing::info!(appointment_id = %cancelled.id, "appointment cancelled");

        Ok(cancelled)
    }

    /// Shift-containment plus overlap check for one staff member.
    async fn staff_is_free(
        &self,
        staff_repo: &StaffRepository<'_>,
        appointments: &AppointmentRepository<'_>,
        staff_id: StaffId,
        weekday: Weekday,
        date: NaiveDate,
        slot: Interval,
    ) -> Result<bool, BookingError> {
        let day_shifts: Vec<Interval> = staff_repo
            .shifts(staff_id)
            .await?
            .iter()
            .filter(|s| s.is_on(weekday))
            .map(Shift::interval)
            .collect();

        if day_shifts.is_empty() {
            return Ok(false);
        }

        let busy: Vec<Interval> = appointments
            .active_spans_on(staff_id, date)
            .await?
            .iter()
            .map(|span| span.interval())
            .collect();

        Ok(slot_fits(&day_shifts, &busy, slot))
    }
}

/// Check that every required client field is present and the email is
/// plausible. Runs before anything touches the database.
pub fn validate_client_fields(request: &BookingRequest) -> Result<(), BookingError> {
    let required = [
        ("client_name", &request.client_name),
        ("national_id", &request.national_id),
        ("email", &request.email),
        ("phone", &request.phone),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(BookingError::MissingField(field));
        }
    }

    if !is_valid_email(request.email.trim()) {
        return Err(BookingError::InvalidEmail);
    }

    Ok(())
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_validate_client_fields_ok() {
        assert!(validate_client_fields(&request()).is_ok());
    }

    #[test]
    fn test_validate_client_fields_missing() {
        for field in ["client_name", "national_id", "email", "phone"] {
            let mut req = request();
            match field {
                "client_name" => req.client_name = "  ".into(),
                "national_id" => req.national_id = String::new(),
                "email" => req.email = String::new(),
                _ => req.phone = String::new(),
            }
            assert!(
                matches!(
                    validate_client_fields(&req),
                    Err(BookingError::MissingField(f)) if f == field
                ),
                "expected MissingField({field})"
            );
        }
    }

    #[test]
    fn test_validate_client_fields_bad_email() {
        let mut req = request();
        req.email = "not-an-email".into();
        assert!(matches!(
            validate_client_fields(&req),
            Err(BookingError::InvalidEmail)
        ));

        req.email = "user@nodot".into();
        assert!(matches!(
            validate_client_fields(&req),
            Err(BookingError::InvalidEmail)
        ));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("test"));
    }
}
