//! Half-open minute-of-day intervals and the free-interval sweep.

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` in minutes since midnight.
///
/// An interval with `start >= end` is empty. Appointments occupy
/// `[start, start + duration)`, so two back-to-back appointments
/// (one ending exactly when the next begins) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Inclusive start, minutes since midnight.
    pub start: u16,
    /// Exclusive end, minutes since midnight.
    pub end: u16,
}

impl Interval {
    /// Create an interval from start and end minutes.
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Length in minutes; zero for empty intervals.
    #[must_use]
    pub const fn duration(self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval contains no minutes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Whether two intervals share at least one minute.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this interval.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Intersect with a window, returning `None` when nothing remains.
    #[must_use]
    pub fn clamp_to(self, window: Self) -> Option<Self> {
        let clamped = Self {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        };
        (!clamped.is_empty()).then_some(clamped)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            super::time::from_minutes(self.start),
            super::time::from_minutes(self.end)
        )
    }
}

/// Compute the free sub-intervals of a shift window given a set of busy
/// intervals.
///
/// Busy intervals may arrive unsorted, overlapping each other, or partially
/// or entirely outside the shift; they are clamped to the shift window
/// first, then swept left to right. The cursor only ever advances via `max`,
/// so out-of-order or nested busy intervals cannot drag it backwards.
///
/// A fully booked shift yields an empty vector, not an error.
#[must_use]
pub fn free_intervals(shift: Interval, busy: &[Interval]) -> Vec<Interval> {
    if shift.is_empty() {
        return Vec::new();
    }

    let mut clamped: Vec<Interval> = busy
        .iter()
        .filter_map(|b| b.clamp_to(shift))
        .collect();
    clamped.sort_unstable_by_key(|b| b.start);

    let mut free = Vec::new();
    let mut cursor = shift.start;

    for b in clamped {
        if b.start > cursor {
            free.push(Interval::new(cursor, b.start));
        }
        cursor = cursor.max(b.end);
    }

    if cursor < shift.end {
        free.push(Interval::new(cursor, shift.end));
    }

    free
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u16, end: u16) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn test_overlaps() {
        assert!(iv(60, 120).overlaps(iv(90, 150)));
        assert!(iv(60, 120).overlaps(iv(0, 61)));
        // Touching endpoints do not overlap (half-open)
        assert!(!iv(60, 120).overlaps(iv(120, 180)));
        assert!(!iv(60, 120).overlaps(iv(0, 60)));
        assert!(!iv(60, 120).overlaps(iv(200, 260)));
    }

    #[test]
    fn test_clamp_to() {
        let window = iv(480, 780);
        assert_eq!(iv(400, 500).clamp_to(window), Some(iv(480, 500)));
        assert_eq!(iv(500, 900).clamp_to(window), Some(iv(500, 780)));
        assert_eq!(iv(0, 400).clamp_to(window), None);
        assert_eq!(iv(800, 900).clamp_to(window), None);
    }

    #[test]
    fn test_free_intervals_no_busy() {
        assert_eq!(free_intervals(iv(480, 780), &[]), vec![iv(480, 780)]);
    }

    #[test]
    fn test_free_intervals_basic_gaps() {
        // Shift 08:00-13:00, busy 09:00-09:30 and 11:00-12:00
        let free = free_intervals(iv(480, 780), &[iv(540, 570), iv(660, 720)]);
        assert_eq!(free, vec![iv(480, 540), iv(570, 660), iv(720, 780)]);
    }

    #[test]
    fn test_free_intervals_unsorted_and_overlapping_busy() {
        // Same result regardless of ordering or nesting of busy input
        let free = free_intervals(
            iv(480, 780),
            &[iv(660, 720), iv(540, 570), iv(545, 560), iv(650, 700)],
        );
        assert_eq!(free, vec![iv(480, 540), iv(570, 650), iv(720, 780)]);
    }

    #[test]
    fn test_free_intervals_busy_outside_shift_ignored() {
        let free = free_intervals(iv(480, 780), &[iv(0, 60), iv(900, 960)]);
        assert_eq!(free, vec![iv(480, 780)]);
    }

    #[test]
    fn test_free_intervals_busy_straddling_edges() {
        let free = free_intervals(iv(480, 780), &[iv(400, 500), iv(760, 900)]);
        assert_eq!(free, vec![iv(500, 760)]);
    }

    #[test]
    fn test_free_intervals_fully_booked() {
        assert_eq!(free_intervals(iv(480, 780), &[iv(480, 780)]), Vec::new());
        assert_eq!(
            free_intervals(iv(480, 780), &[iv(480, 600), iv(600, 780)]),
            Vec::new()
        );
    }

    #[test]
    fn test_free_plus_busy_partitions_shift() {
        // Sum of free lengths + busy-within-shift lengths == shift length,
        // for disjoint busy input clamped to the shift
        let shift = iv(480, 780);
        let busy = [iv(540, 570), iv(660, 720)];
        let free = free_intervals(shift, &busy);

        let free_len: u16 = free.iter().map(|i| i.duration()).sum();
        let busy_len: u16 = busy
            .iter()
            .filter_map(|b| b.clamp_to(shift))
            .map(Interval::duration)
            .sum();
        assert_eq!(free_len + busy_len, shift.duration());
    }
}
