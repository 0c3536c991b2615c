// libs/shared/database/src/memory.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use shared_models::{AppError, Appointment, AppointmentStatus, AvailabilityWindow};

use crate::store::{NewAppointment, NewAvailabilityWindow, SchedulingStore};

#[derive(Debug, Default)]
struct StoreState {
    windows: BTreeMap<i64, AvailabilityWindow>,
    appointments: BTreeMap<i64, Appointment>,
    next_window_id: i64,
    next_appointment_id: i64,
}

impl StoreState {
    fn slot_holder(&self, candidate: &Appointment) -> Option<&Appointment> {
        self.appointments.values().find(|existing| {
            existing.id != candidate.id
                && existing.status.blocks_slot()
                && existing.doctor_id == candidate.doctor_id
                && existing.date == candidate.date
                && existing.time == candidate.time
        })
    }
}

/// Process-local store. Every write runs under one write guard, so the
/// uniqueness check on scheduled slots and the insert are atomic.
#[derive(Debug, Default)]
pub struct InMemorySchedulingStore {
    state: RwLock<StoreState>,
}

impl InMemorySchedulingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchedulingStore for InMemorySchedulingStore {
    async fn list_availability_windows(
        &self,
        doctor_id: i64,
    ) -> Result<Vec<AvailabilityWindow>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .windows
            .values()
            .filter(|w| w.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn get_availability_window(
        &self,
        id: i64,
    ) -> Result<Option<AvailabilityWindow>, AppError> {
        Ok(self.state.read().await.windows.get(&id).cloned())
    }

    async fn insert_availability_window(
        &self,
        window: NewAvailabilityWindow,
    ) -> Result<AvailabilityWindow, AppError> {
        let mut state = self.state.write().await;
        state.next_window_id += 1;

        let stored = AvailabilityWindow {
            id: state.next_window_id,
            doctor_id: window.doctor_id,
            day_of_week: window.day_of_week,
            start_time: window.start_time,
            end_time: window.end_time,
            active: window.active,
        };
        state.windows.insert(stored.id, stored.clone());

        debug!("Stored availability window {}", stored.id);
        Ok(stored)
    }

    async fn update_availability_window(
        &self,
        window: AvailabilityWindow,
    ) -> Result<AvailabilityWindow, AppError> {
        let mut state = self.state.write().await;
        match state.windows.get_mut(&window.id) {
            Some(existing) => {
                *existing = window.clone();
                Ok(window)
            }
            None => Err(AppError::NotFound(format!(
                "availability window {}",
                window.id
            ))),
        }
    }

    async fn delete_availability_window(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state
            .windows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("availability window {}", id)))
    }

    async fn list_appointments_for_doctor(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.date == date)
            .cloned()
            .collect())
    }

    async fn list_appointments_for_pair(
        &self,
        patient_id: i64,
        doctor_id: i64,
    ) -> Result<Vec<Appointment>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .appointments
            .values()
            .filter(|a| a.patient_id == patient_id && a.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>, AppError> {
        Ok(self.state.read().await.appointments.get(&id).cloned())
    }

    async fn insert_appointment(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppError> {
        let mut state = self.state.write().await;

        let candidate = Appointment {
            id: state.next_appointment_id + 1,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            date: appointment.date,
            time: appointment.time,
            status: AppointmentStatus::Scheduled,
            appointment_type: appointment.appointment_type,
            notes: appointment.notes,
        };

        if let Some(holder) = state.slot_holder(&candidate) {
            warn!(
                "Unique slot constraint violated for doctor {} at {} {} (held by {})",
                candidate.doctor_id, candidate.date, candidate.time, holder.id
            );
            return Err(AppError::Conflict(format!(
                "doctor {} already has a scheduled appointment at {} {}",
                candidate.doctor_id, candidate.date, candidate.time
            )));
        }

        state.next_appointment_id = candidate.id;
        state.appointments.insert(candidate.id, candidate.clone());

        debug!("Stored appointment {}", candidate.id);
        Ok(candidate)
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError> {
        let mut state = self.state.write().await;

        let mut updated = state
            .appointments
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("appointment {}", id)))?;

        if updated.status != expected {
            warn!(
                "Stale status write for appointment {}: expected {}, found {}",
                id, expected, updated.status
            );
            return Err(AppError::Conflict(format!(
                "appointment {} is {}, not {}",
                id, updated.status, expected
            )));
        }
        updated.status = status;

        if status.blocks_slot() && state.slot_holder(&updated).is_some() {
            return Err(AppError::Conflict(format!(
                "doctor {} already has a scheduled appointment at {} {}",
                updated.doctor_id, updated.date, updated.time
            )));
        }

        state.appointments.insert(id, updated.clone());
        Ok(updated)
    }
}
