// libs/doctor-cell/src/services/overlap.rs
//
// Pure checks over an already-fetched snapshot of a doctor's windows. Nothing
// here reads or writes storage.

use chrono::NaiveTime;

use shared_models::{AvailabilityWindow, DayOfWeek};

use crate::models::AvailabilityError;

/// Fails with `InvalidTimeRange` unless `start < end`.
pub fn validate_window(start: NaiveTime, end: NaiveTime) -> Result<(), AvailabilityError> {
    if start >= end {
        return Err(AvailabilityError::InvalidTimeRange { start, end });
    }
    Ok(())
}

/// Half-open intervals `[start1, end1)` and `[start2, end2)` overlap iff
/// `start1 < end2 && start2 < end1`. Touching ends do not overlap.
pub fn intervals_overlap(
    start1: NaiveTime,
    end1: NaiveTime,
    start2: NaiveTime,
    end2: NaiveTime,
) -> bool {
    start1 < end2 && start2 < end1
}

/// Every window of `doctor_id` on `day` that overlaps `[start, end)`, in input order.
///
/// `exclude_id` skips the window being updated so it is never compared with
/// its own previous version.
pub fn find_conflicts(
    doctor_id: i64,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<i64>,
    existing: &[AvailabilityWindow],
) -> Vec<AvailabilityWindow> {
    existing
        .iter()
        .filter(|w| w.doctor_id == doctor_id && w.day_of_week == day)
        .filter(|w| Some(w.id) != exclude_id)
        .filter(|w| intervals_overlap(start, end, w.start_time, w.end_time))
        .cloned()
        .collect()
}

pub fn has_conflict(
    doctor_id: i64,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<i64>,
    existing: &[AvailabilityWindow],
) -> bool {
    !find_conflicts(doctor_id, day, start, end, exclude_id, existing).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn overlap_predicate_is_symmetric() {
        let pairs = [
            ((9, 11), (10, 12), true),
            ((9, 10), (10, 11), false),
            ((9, 12), (10, 11), true),
            ((9, 10), (11, 12), false),
            ((9, 10), (9, 10), true),
        ];

        for ((s1, e1), (s2, e2), expected) in pairs {
            let a = intervals_overlap(t(s1, 0), t(e1, 0), t(s2, 0), t(e2, 0));
            let b = intervals_overlap(t(s2, 0), t(e2, 0), t(s1, 0), t(e1, 0));
            assert_eq!(a, expected, "{}-{} vs {}-{}", s1, e1, s2, e2);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_length_interval_overlaps_nothing() {
        assert!(!intervals_overlap(t(10, 0), t(10, 0), t(9, 0), t(12, 0)));
    }

    #[test]
    fn validate_window_rejects_empty_and_inverted_ranges() {
        assert!(validate_window(t(9, 0), t(9, 1)).is_ok());
        assert_eq!(
            validate_window(t(9, 0), t(9, 0)),
            Err(AvailabilityError::InvalidTimeRange { start: t(9, 0), end: t(9, 0) })
        );
        assert!(validate_window(t(17, 0), t(8, 0)).is_err());
    }
}
