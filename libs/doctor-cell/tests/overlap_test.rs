// libs/doctor-cell/tests/overlap_test.rs

use assert_matches::assert_matches;

use doctor_cell::models::AvailabilityError;
use doctor_cell::services::overlap::{find_conflicts, has_conflict, validate_window};
use shared_models::DayOfWeek;
use shared_utils::test_utils::{time, TestRows};

const DOCTOR: i64 = 7;

// ==============================================================================
// TIME-WINDOW VALIDATOR
// ==============================================================================

#[test]
fn every_forward_range_is_valid() {
    for start_hour in 0..23 {
        for end_hour in (start_hour + 1)..24 {
            assert!(validate_window(time(start_hour, 0), time(end_hour, 0)).is_ok());
        }
    }
}

#[test]
fn every_empty_or_backward_range_is_rejected() {
    for start_hour in 0..24 {
        for end_hour in 0..=start_hour {
            assert_matches!(
                validate_window(time(start_hour, 0), time(end_hour, 0)),
                Err(AvailabilityError::InvalidTimeRange { .. })
            );
        }
    }
}

// ==============================================================================
// OVERLAP DETECTOR
// ==============================================================================

#[test]
fn overlapping_window_is_reported() {
    let existing = vec![TestRows::window(1, DOCTOR, DayOfWeek::Monday, time(9, 0), time(12, 0))];

    let conflicts = find_conflicts(
        DOCTOR,
        DayOfWeek::Monday,
        time(11, 0),
        time(13, 0),
        None,
        &existing,
    );

    assert_eq!(conflicts, existing);
    assert!(has_conflict(DOCTOR, DayOfWeek::Monday, time(11, 0), time(13, 0), None, &existing));
}

#[test]
fn back_to_back_window_is_not_a_conflict() {
    let existing = vec![TestRows::window(1, DOCTOR, DayOfWeek::Monday, time(9, 0), time(12, 0))];

    assert!(!has_conflict(DOCTOR, DayOfWeek::Monday, time(12, 0), time(14, 0), None, &existing));
    assert!(!has_conflict(DOCTOR, DayOfWeek::Monday, time(7, 0), time(9, 0), None, &existing));
}

#[test]
fn consecutive_hour_windows_never_conflict() {
    let existing = vec![TestRows::window(1, DOCTOR, DayOfWeek::Tuesday, time(9, 0), time(10, 0))];

    assert!(!has_conflict(DOCTOR, DayOfWeek::Tuesday, time(10, 0), time(11, 0), None, &existing));
}

#[test]
fn disjoint_pairs_never_conflict_and_overlapping_pairs_always_do() {
    // quarter-hour grid over one morning
    let grid: Vec<_> = (0..=16).map(|q| time(8 + q / 4, (q % 4) * 15)).collect();

    for (i, &s1) in grid.iter().enumerate() {
        for &e1 in &grid[i + 1..] {
            let existing = vec![TestRows::window(1, DOCTOR, DayOfWeek::Wednesday, s1, e1)];
            for (j, &s2) in grid.iter().enumerate() {
                for &e2 in &grid[j + 1..] {
                    let expected = s1 < e2 && s2 < e1;
                    assert_eq!(
                        has_conflict(DOCTOR, DayOfWeek::Wednesday, s2, e2, None, &existing),
                        expected,
                        "[{}, {}) vs [{}, {})",
                        s1,
                        e1,
                        s2,
                        e2
                    );
                }
            }
        }
    }
}

#[test]
fn returns_every_conflicting_window_in_order() {
    let existing = vec![
        TestRows::window(1, DOCTOR, DayOfWeek::Monday, time(8, 0), time(9, 0)),
        TestRows::window(2, DOCTOR, DayOfWeek::Monday, time(9, 0), time(10, 0)),
        TestRows::window(3, DOCTOR, DayOfWeek::Monday, time(13, 0), time(15, 0)),
        TestRows::window(4, DOCTOR, DayOfWeek::Monday, time(10, 30), time(11, 30)),
    ];

    let conflicts = find_conflicts(
        DOCTOR,
        DayOfWeek::Monday,
        time(8, 30),
        time(11, 0),
        None,
        &existing,
    );

    assert_eq!(conflicts.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1, 2, 4]);
}

#[test]
fn other_days_and_other_doctors_are_ignored() {
    let existing = vec![
        TestRows::window(1, DOCTOR, DayOfWeek::Tuesday, time(9, 0), time(12, 0)),
        TestRows::window(2, DOCTOR + 1, DayOfWeek::Monday, time(9, 0), time(12, 0)),
    ];

    assert!(find_conflicts(DOCTOR, DayOfWeek::Monday, time(9, 0), time(12, 0), None, &existing)
        .is_empty());
}

#[test]
fn window_being_updated_is_excluded() {
    let existing = vec![
        TestRows::window(1, DOCTOR, DayOfWeek::Friday, time(9, 0), time(12, 0)),
        TestRows::window(2, DOCTOR, DayOfWeek::Friday, time(14, 0), time(16, 0)),
    ];

    // widening window 1 only collides with itself
    assert!(!has_conflict(DOCTOR, DayOfWeek::Friday, time(8, 0), time(13, 0), Some(1), &existing));

    // stretching window 1 into window 2 still conflicts
    let conflicts = find_conflicts(
        DOCTOR,
        DayOfWeek::Friday,
        time(9, 0),
        time(15, 0),
        Some(1),
        &existing,
    );
    assert_eq!(conflicts.iter().map(|w| w.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn inactive_windows_still_take_part_in_overlap() {
    let mut window = TestRows::window(1, DOCTOR, DayOfWeek::Monday, time(9, 0), time(12, 0));
    window.active = false;

    assert!(has_conflict(DOCTOR, DayOfWeek::Monday, time(10, 0), time(11, 0), None, &[window]));
}
