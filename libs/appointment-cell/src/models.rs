// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use doctor_cell::models::AvailabilityError;
use shared_models::{AppError, AppointmentStatus, AppointmentType};

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment {0} not found")]
    NotFound(i64),

    #[error("Appointment cannot move from {from} to {to}")]
    InvalidStateTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Doctor {doctor_id} already has an appointment at {date} {time}")]
    SlotNotAvailable {
        doctor_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    },

    #[error("Patient {patient_id} already has an appointment with doctor {doctor_id} on {date}")]
    DuplicateBooking {
        patient_id: i64,
        doctor_id: i64,
        date: NaiveDate,
    },

    #[error("Doctor {doctor_id} is not available at {date} {time}")]
    DoctorNotAvailable {
        doctor_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    },

    #[error("Availability check failed: {0}")]
    AvailabilityCheck(AvailabilityError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AppointmentError {
    /// Rejections caused by an existing booking rather than bad input
    pub fn is_scheduling_conflict(&self) -> bool {
        matches!(
            self,
            AppointmentError::SlotNotAvailable { .. } | AppointmentError::DuplicateBooking { .. }
        )
    }
}

impl From<AppError> for AppointmentError {
    fn from(err: AppError) -> Self {
        AppointmentError::DatabaseError(err.to_string())
    }
}

impl From<AvailabilityError> for AppointmentError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::Database(msg) => AppointmentError::DatabaseError(msg),
            other => AppointmentError::AvailabilityCheck(other),
        }
    }
}
