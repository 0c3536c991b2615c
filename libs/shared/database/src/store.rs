// libs/shared/database/src/store.rs
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use shared_models::{
    AppError, Appointment, AppointmentStatus, AppointmentType, AvailabilityWindow, DayOfWeek,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NewAvailabilityWindow {
    pub doctor_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

/// Query interface the scheduling services read snapshots from and write through.
///
/// Implementations must reject a second `Scheduled` appointment on the same
/// `(doctor_id, date, time)` with [`AppError::Conflict`]. The conflict checks in
/// the cells run against already-read data, so this constraint is what actually
/// closes the race between two concurrent bookings.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    async fn list_availability_windows(
        &self,
        doctor_id: i64,
    ) -> Result<Vec<AvailabilityWindow>, AppError>;

    async fn get_availability_window(&self, id: i64)
        -> Result<Option<AvailabilityWindow>, AppError>;

    async fn insert_availability_window(
        &self,
        window: NewAvailabilityWindow,
    ) -> Result<AvailabilityWindow, AppError>;

    async fn update_availability_window(
        &self,
        window: AvailabilityWindow,
    ) -> Result<AvailabilityWindow, AppError>;

    async fn delete_availability_window(&self, id: i64) -> Result<(), AppError>;

    async fn list_appointments_for_doctor(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError>;

    async fn list_appointments_for_pair(
        &self,
        patient_id: i64,
        doctor_id: i64,
    ) -> Result<Vec<Appointment>, AppError>;

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>, AppError>;

    async fn insert_appointment(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppError>;

    /// Compare-and-set on the status: fails with [`AppError::Conflict`] unless the
    /// stored status is still `expected` when the write lands.
    async fn update_appointment_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError>;
}
