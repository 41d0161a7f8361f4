//! Availability aggregator.
//!
//! For a rolling window of dates, computes bookable slot starts per day by
//! running the scheduling engine over each qualified staff member's shifts
//! and already-booked intervals. Read-only; safe to run concurrently with
//! bookings (a racing booking just makes one offered slot fail later with a
//! conflict).

use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use turnera_core::schedule::{Interval, Weekday, day_slots, from_minutes};
use turnera_core::{ServiceId, Slug, StaffId};

use crate::db::{
    AppointmentRepository, RepositoryError, ServiceRepository, StaffRepository, TenantRepository,
};
use crate::models::{Shift, Staff};

/// Length of the rolling availability window in days (today inclusive).
pub const AVAILABILITY_WINDOW_DAYS: u64 = 15;

/// Errors from the availability aggregator.
#[derive(Debug, Error)]
pub enum AvailabilityError {
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
    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One bookable slot start.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotEntry {
    /// Start time as "HH:MM".
    pub time: String,
    /// Serving staff member; omitted when slots were collapsed across staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<StaffId>,
}

/// All bookable slots for one date. Dates without slots are never emitted.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<SlotEntry>,
}

/// Per-staff data needed to compute a day's slots.
struct StaffSchedule {
    staff_id: StaffId,
    shifts: Vec<Shift>,
    busy_by_date: HashMap<NaiveDate, Vec<Interval>>,
}

/// Availability aggregation service.
pub struct AvailabilityService<'a> {
    pool: &'a PgPool,
}

impl<'a> AvailabilityService<'a> {
    /// Create a new availability service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compute per-day bookable slots for a service over the rolling window
    /// (today through today + 14).
    ///
    /// With `staff_id` given, only that staff member is considered and each
    /// slot keeps its staff identity; without it, all qualified staff
    /// contribute and slots are collapsed by start time.
    ///
    /// # Errors
    ///
    /// Returns `AvailabilityError` if the tenant, service, or requested
    /// staff member cannot be resolved, or on repository failure.
    #[instrument(skip(self), fields(slug = %slug, service_id = %service_id))]
    pub async fn availability(
        &self,
        slug: &Slug,
        service_id: ServiceId,
        staff_id: Option<StaffId>,
    ) -> Result<Vec<DayAvailability>, AvailabilityError> {
        let today = Local::now().date_naive();
        self.availability_from(slug, service_id, staff_id, today)
            .await
    }

    /// Same as [`availability`](Self::availability) with an explicit window
    /// start.
    ///
    /// # Errors
    ///
    /// Returns `AvailabilityError` if the tenant, service, or requested
    /// staff member cannot be resolved, or on repository failure.
    pub async fn availability_from(
        &self,
        slug: &Slug,
        service_id: ServiceId,
        staff_id: Option<StaffId>,
        window_start: NaiveDate,
    ) -> Result<Vec<DayAvailability>, AvailabilityError> {
        let tenants = TenantRepository::new(self.pool);
        let services = ServiceRepository::new(self.pool);
        let staff_repo = StaffRepository::new(self.pool);
        let appointments = AppointmentRepository::new(self.pool);

        let tenant = tenants
            .get_by_slug(slug)
            .await?
            .ok_or(AvailabilityError::TenantNotFound)?;
        let service = services
            .get_for_tenant(tenant.id, service_id)
            .await?
            .ok_or(AvailabilityError::ServiceNotFound)?;

        let candidates: Vec<Staff> = match staff_id {
            Some(id) => {
                let member = staff_repo
                    .get_for_tenant(tenant.id, id)
                    .await?
                    .ok_or(AvailabilityError::StaffNotFound)?;
                if !staff_repo.is_qualified(id, service_id).await? {
                    return Err(AvailabilityError::NotQualified);
                }
                vec![member]
            }
            None => staff_repo.list_qualified(tenant.id, service_id).await?,
        };

        let window = rolling_window(window_start, AVAILABILITY_WINDOW_DAYS);
        let Some(window_end) = window.last().copied() else {
            return Ok(Vec::new());
        };

        let mut schedules = Vec::with_capacity(candidates.len());
        for member in &candidates {
            let shifts = staff_repo.shifts(member.id).await?;
            let spans = appointments
                .active_spans_between(member.id, window_start, window_end)
                .await?;

            let mut busy_by_date: HashMap<NaiveDate, Vec<Interval>> = HashMap::new();
            for span in spans {
                busy_by_date.entry(span.date).or_default().push(span.interval());
            }

            schedules.push(StaffSchedule {
                staff_id: member.id,
                shifts,
                busy_by_date,
            });
        }

        let keep_staff = staff_id.is_some();
        let mut days = Vec::new();

        for date in window {
            let weekday = Weekday::from_date(date);
            let mut starts: Vec<(u16, StaffId)> = Vec::new();

            for schedule in &schedules {
                let day_shifts: Vec<Interval> = schedule
                    .shifts
                    .iter()
                    .filter(|s| s.is_on(weekday))
                    .map(Shift::interval)
                    .collect();
                if day_shifts.is_empty() {
                    continue;
                }

                let busy = schedule
                    .busy_by_date
                    .get(&date)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                for start in day_slots(&day_shifts, busy, service.duration()) {
                    starts.push((start, schedule.staff_id));
                }
            }

            let slots = if keep_staff {
                staff_slots(starts)
            } else {
                collapse_slots(starts)
            };

            if !slots.is_empty() {
                days.push(DayAvailability { date, slots });
            }
        }

        Ok(days)
    }
}

/// The dates of a rolling window starting at `start`, inclusive.
#[must_use]
pub fn rolling_window(start: NaiveDate, days: u64) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}

/// Collapse slot starts across staff members: one entry per distinct start
/// time, staff identity discarded.
#[must_use]
pub fn collapse_slots(mut starts: Vec<(u16, StaffId)>) -> Vec<SlotEntry> {
    starts.sort_unstable_by_key(|(start, _)| *start);
    starts.dedup_by_key(|(start, _)| *start);
    starts
        .into_iter()
        .map(|(start, _)| SlotEntry {
            time: from_minutes(start),
            staff_id: None,
        })
        .collect()
}

/// Keep staff identity on each slot, ordered by time then staff id.
#[must_use]
pub fn staff_slots(mut starts: Vec<(u16, StaffId)>) -> Vec<SlotEntry> {
    starts.sort_unstable();
    starts.dedup();
    starts
        .into_iter()
        .map(|(start, staff_id)| SlotEntry {
            time: from_minutes(start),
            staff_id: Some(staff_id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_window_spans_fifteen_days() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 28).expect("valid date");
        let window = rolling_window(start, AVAILABILITY_WINDOW_DAYS);
        assert_eq!(window.len(), 15);
        assert_eq!(window.first(), Some(&start));
        assert_eq!(
            window.last(),
            Some(&NaiveDate::from_ymd_opt(2025, 5, 12).expect("valid date"))
        );
    }

    #[test]
    fn test_collapse_slots_drops_staff_and_dedupes() {
        let a = StaffId::new(1);
        let b = StaffId::new(2);
        let slots = collapse_slots(vec![(540, b), (480, a), (540, a), (510, b)]);
        assert_eq!(
            slots,
            vec![
                SlotEntry { time: "08:00".into(), staff_id: None },
                SlotEntry { time: "08:30".into(), staff_id: None },
                SlotEntry { time: "09:00".into(), staff_id: None },
            ]
        );
    }

    #[test]
    fn test_staff_slots_keeps_identity() {
        let a = StaffId::new(1);
        let slots = staff_slots(vec![(540, a), (480, a)]);
        assert_eq!(
            slots,
            vec![
                SlotEntry { time: "08:00".into(), staff_id: Some(a) },
                SlotEntry { time: "09:00".into(), staff_id: Some(a) },
            ]
        );
    }
}
