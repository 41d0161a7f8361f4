//! Slot-grid generation over free intervals.

use super::interval::{Interval, free_intervals};

/// Fixed step between candidate slot starts, in minutes.
///
/// Slot starts are always enumerated on this grid regardless of service
/// duration. When the duration is not a multiple of the grid, consecutive
/// candidate slots overlap; that is intended - a client may book any
/// grid-aligned start as long as the full duration fits.
pub const SLOT_GRID_MINUTES: u16 = 30;

/// Enumerate candidate slot starts for one shift window.
///
/// Runs the free-interval sweep over `busy`, then walks each free interval
/// on the [`SLOT_GRID_MINUTES`] grid, emitting every start where
/// `[start, start + duration)` fits. Each emitted slot is re-validated
/// against the full busy list rather than just its free interval, so
/// imprecise clamping at interval seams cannot mask a conflict.
///
/// Returns ascending, deduplicated minute values; empty when `duration`
/// is zero or nothing fits.
#[must_use]
pub fn candidate_slots(shift: Interval, busy: &[Interval], duration: u16) -> Vec<u16> {
    if duration == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();

    for free in free_intervals(shift, busy) {
        let mut start = free.start;
        while start + duration <= free.end {
            let slot = Interval::new(start, start + duration);
            if shift.contains(slot) && !busy.iter().any(|b| slot.overlaps(*b)) {
                slots.push(start);
            }
            start += SLOT_GRID_MINUTES;
        }
    }

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Enumerate candidate slot starts across all of a staff member's shifts
/// for one day.
///
/// Shifts are swept independently and the union is deduplicated; a pair of
/// overlapping shifts is tolerated (each contributes its own slots) but
/// logged as a data-quality warning.
#[must_use]
pub fn day_slots(shifts: &[Interval], busy: &[Interval], duration: u16) -> Vec<u16> {
    warn_on_overlapping_shifts(shifts);

    let mut slots: Vec<u16> = shifts
        .iter()
        .flat_map(|shift| candidate_slots(*shift, busy, duration))
        .collect();

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Test whether a single requested slot can be booked against a day's
/// shifts and busy intervals.
///
/// This is the direct overlap check used when validating an explicit
/// booking request - no slot enumeration involved. The slot must lie
/// entirely within one shift window and overlap no busy interval.
#[must_use]
pub fn slot_fits(shifts: &[Interval], busy: &[Interval], slot: Interval) -> bool {
    if slot.is_empty() {
        return false;
    }
    shifts.iter().any(|shift| shift.contains(slot)) && !busy.iter().any(|b| slot.overlaps(*b))
}

fn warn_on_overlapping_shifts(shifts: &[Interval]) {
    for (i, a) in shifts.iter().enumerate() {
        for b in shifts.iter().skip(i + 1) {
            if a.overlaps(*b) {
                tracing::warn!(first = %a, second = %b, "overlapping shifts on the same weekday");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u16, end: u16) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn test_slots_empty_when_duration_zero() {
        assert!(candidate_slots(iv(480, 780), &[], 0).is_empty());
    }

    #[test]
    fn test_slots_open_shift() {
        // Shift 08:00-10:00, D=30 -> 08:00, 08:30, 09:00, 09:30
        assert_eq!(
            candidate_slots(iv(480, 600), &[], 30),
            vec![480, 510, 540, 570]
        );
    }

    #[test]
    fn test_slots_around_single_appointment() {
        // Shift 08:00-13:00, busy 09:00 + 30min, D=30, G=30.
        // 08:30 is included because 08:30+30 = 09:00 <= 09:00;
        // 09:00 itself is excluded.
        let busy = [iv(540, 570)];
        let slots = candidate_slots(iv(480, 780), &busy, 30);
        assert_eq!(
            slots,
            vec![480, 510, 570, 600, 630, 660, 690, 720, 750]
        );
        assert!(!slots.contains(&540));
    }

    #[test]
    fn test_slots_duration_not_multiple_of_grid() {
        // Shift 08:00-09:00, D=45 -> only 08:00 fits (08:30+45 > 09:00)
        assert_eq!(candidate_slots(iv(480, 540), &[], 45), vec![480]);
    }

    #[test]
    fn test_slots_overlapping_starts_when_duration_exceeds_grid() {
        // Shift 08:00-10:00, D=45 -> 08:00, 08:30, 09:00 all fit; the
        // resulting bookable intervals overlap on purpose
        assert_eq!(candidate_slots(iv(480, 600), &[], 45), vec![480, 510, 540]);
    }

    #[test]
    fn test_slots_never_overlap_busy_and_stay_in_shift() {
        let shift = iv(480, 780);
        let busy = [iv(540, 585), iv(700, 750)];
        for duration in [15u16, 30, 45, 60] {
            for start in candidate_slots(shift, &busy, duration) {
                let slot = iv(start, start + duration);
                assert!(shift.contains(slot), "{slot:?} escapes shift");
                for b in &busy {
                    assert!(!slot.overlaps(*b), "{slot:?} overlaps busy {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_slots_fully_booked() {
        assert!(candidate_slots(iv(480, 600), &[iv(480, 600)], 30).is_empty());
    }

    #[test]
    fn test_day_slots_unions_multiple_shifts() {
        // Morning 08:00-10:00 and afternoon 14:00-15:00
        let slots = day_slots(&[iv(480, 600), iv(840, 900)], &[], 30);
        assert_eq!(slots, vec![480, 510, 540, 570, 840, 870]);
    }

    #[test]
    fn test_day_slots_dedupes_overlapping_shifts() {
        // Overlapping shifts contribute overlapping grids; duplicates collapse
        let slots = day_slots(&[iv(480, 600), iv(540, 660)], &[], 30);
        assert_eq!(slots, vec![480, 510, 540, 570, 600, 630]);
    }

    #[test]
    fn test_day_slots_no_shifts() {
        assert!(day_slots(&[], &[], 30).is_empty());
    }

    #[test]
    fn test_slot_fits_inside_shift() {
        let shifts = [iv(480, 780)];
        assert!(slot_fits(&shifts, &[], iv(480, 510)));
        assert!(slot_fits(&shifts, &[], iv(750, 780)));
        // Crossing the shift end does not fit
        assert!(!slot_fits(&shifts, &[], iv(760, 790)));
        // Outside any shift
        assert!(!slot_fits(&shifts, &[], iv(300, 330)));
    }

    #[test]
    fn test_slot_fits_rejects_busy_overlap() {
        let shifts = [iv(480, 780)];
        let busy = [iv(540, 570)];
        assert!(!slot_fits(&shifts, &busy, iv(540, 570)));
        assert!(!slot_fits(&shifts, &busy, iv(555, 585)));
        // Back-to-back is fine
        assert!(slot_fits(&shifts, &busy, iv(510, 540)));
        assert!(slot_fits(&shifts, &busy, iv(570, 600)));
    }

    #[test]
    fn test_slot_fits_must_sit_in_one_shift() {
        // Two adjacent shifts; a slot spanning the seam fits neither
        let shifts = [iv(480, 600), iv(600, 720)];
        assert!(!slot_fits(&shifts, &[], iv(570, 630)));
        assert!(slot_fits(&shifts, &[], iv(570, 600)));
        assert!(!slot_fits(&shifts, &[], iv(600, 600)));
    }
}
