// libs/appointment-cell/tests/conflict_test.rs

use appointment_cell::services::conflict::{find_slot_holder, has_prior_appointment, is_slot_taken};
use shared_models::AppointmentStatus;
use shared_utils::test_utils::{date, time, TestRows};

const DOCTOR: i64 = 3;
const PATIENT: i64 = 11;

#[test]
fn exact_match_takes_the_slot() {
    let existing = vec![TestRows::appointment(
        1,
        PATIENT,
        DOCTOR,
        date(2024, 6, 10),
        time(10, 0),
        AppointmentStatus::Scheduled,
    )];

    assert!(is_slot_taken(DOCTOR, date(2024, 6, 10), time(10, 0), &existing));
    assert_eq!(
        find_slot_holder(DOCTOR, date(2024, 6, 10), time(10, 0), &existing).map(|a| a.id),
        Some(1)
    );
}

#[test]
fn no_duration_is_modelled() {
    let existing = vec![TestRows::appointment(
        1,
        PATIENT,
        DOCTOR,
        date(2024, 6, 10),
        time(10, 0),
        AppointmentStatus::Scheduled,
    )];

    assert!(!is_slot_taken(DOCTOR, date(2024, 6, 10), time(10, 30), &existing));
    assert!(!is_slot_taken(DOCTOR, date(2024, 6, 10), time(10, 1), &existing));
}

#[test]
fn different_doctor_or_date_does_not_match() {
    let existing = vec![TestRows::appointment(
        1,
        PATIENT,
        DOCTOR,
        date(2024, 6, 10),
        time(10, 0),
        AppointmentStatus::Scheduled,
    )];

    assert!(!is_slot_taken(DOCTOR + 1, date(2024, 6, 10), time(10, 0), &existing));
    assert!(!is_slot_taken(DOCTOR, date(2024, 6, 11), time(10, 0), &existing));
}

#[test]
fn only_scheduled_appointments_block() {
    for status in [
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
    ] {
        let existing = vec![TestRows::appointment(
            1,
            PATIENT,
            DOCTOR,
            date(2024, 6, 10),
            time(10, 0),
            status,
        )];
        assert!(
            !is_slot_taken(DOCTOR, date(2024, 6, 10), time(10, 0), &existing),
            "{} should not block",
            status
        );
    }
}

#[test]
fn cancelling_frees_the_slot() {
    let mut existing = vec![TestRows::appointment(
        1,
        PATIENT,
        DOCTOR,
        date(2024, 6, 10),
        time(10, 0),
        AppointmentStatus::Scheduled,
    )];
    assert!(is_slot_taken(DOCTOR, date(2024, 6, 10), time(10, 0), &existing));

    existing[0].status = AppointmentStatus::Cancelled;
    assert!(!is_slot_taken(DOCTOR, date(2024, 6, 10), time(10, 0), &existing));
}

#[test]
fn holder_is_found_among_cancelled_rebookings() {
    let existing = vec![
        TestRows::appointment(1, PATIENT, DOCTOR, date(2024, 6, 10), time(10, 0), AppointmentStatus::Cancelled),
        TestRows::appointment(2, PATIENT + 1, DOCTOR, date(2024, 6, 10), time(10, 0), AppointmentStatus::Scheduled),
    ];

    assert_eq!(
        find_slot_holder(DOCTOR, date(2024, 6, 10), time(10, 0), &existing).map(|a| a.id),
        Some(2)
    );
}

#[test]
fn prior_appointment_is_same_patient_doctor_and_date() {
    let existing = vec![TestRows::appointment(
        1,
        PATIENT,
        DOCTOR,
        date(2024, 6, 10),
        time(9, 0),
        AppointmentStatus::Scheduled,
    )];

    assert!(has_prior_appointment(PATIENT, DOCTOR, date(2024, 6, 10), &existing));
    assert!(!has_prior_appointment(PATIENT, DOCTOR, date(2024, 6, 11), &existing));
    assert!(!has_prior_appointment(PATIENT + 1, DOCTOR, date(2024, 6, 10), &existing));
    assert!(!has_prior_appointment(PATIENT, DOCTOR + 1, date(2024, 6, 10), &existing));
}

#[test]
fn cancelled_prior_appointment_does_not_count() {
    let existing = vec![TestRows::appointment(
        1,
        PATIENT,
        DOCTOR,
        date(2024, 6, 10),
        time(9, 0),
        AppointmentStatus::Cancelled,
    )];

    assert!(!has_prior_appointment(PATIENT, DOCTOR, date(2024, 6, 10), &existing));
}
