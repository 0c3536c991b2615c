// libs/appointment-cell/src/services/conflict.rs
//
// Slots are single (date, time) points. Appointment duration is not modelled,
// so 10:00 and 10:30 on the same day never clash. These checks read a snapshot
// only; the store's unique slot constraint is what makes booking race-safe.

use chrono::{NaiveDate, NaiveTime};

use shared_models::Appointment;

/// The scheduled appointment holding `doctor_id` at exactly `date` + `time`, if any.
pub fn find_slot_holder(
    doctor_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    existing: &[Appointment],
) -> Option<&Appointment> {
    existing.iter().find(|a| {
        a.status.blocks_slot() && a.doctor_id == doctor_id && a.date == date && a.time == time
    })
}

pub fn is_slot_taken(
    doctor_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    existing: &[Appointment],
) -> bool {
    find_slot_holder(doctor_id, date, time, existing).is_some()
}

/// Whether the patient already has a scheduled appointment with this doctor on `date`.
pub fn has_prior_appointment(
    patient_id: i64,
    doctor_id: i64,
    date: NaiveDate,
    existing: &[Appointment],
) -> bool {
    existing.iter().any(|a| {
        a.status.blocks_slot()
            && a.patient_id == patient_id
            && a.doctor_id == doctor_id
            && a.date == date
    })
}
