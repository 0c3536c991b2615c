// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;
use tracing::{debug, info, warn};

use doctor_cell::services::AvailabilityService;
use shared_config::{AppConfig, SchedulingRules};
use shared_database::{NewAppointment, SchedulingStore};
use shared_models::{Appointment, AppointmentStatus};

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::conflict::{find_slot_holder, has_prior_appointment};
use crate::services::lifecycle::AppointmentLifecycleService;

pub struct AppointmentBookingService<S: SchedulingStore> {
    store: Arc<S>,
    availability_service: AvailabilityService<S>,
    lifecycle_service: AppointmentLifecycleService,
    rules: SchedulingRules,
}

impl<S: SchedulingStore> AppointmentBookingService<S> {
    pub fn new(store: Arc<S>, config: &AppConfig) -> Self {
        Self::with_rules(store, config.scheduling.clone())
    }

    pub fn with_rules(store: Arc<S>, rules: SchedulingRules) -> Self {
        Self {
            availability_service: AvailabilityService::with_rules(Arc::clone(&store), rules.clone()),
            lifecycle_service: AppointmentLifecycleService::new(),
            store,
            rules,
        }
    }

    /// Book a single (date, time) slot with a doctor.
    ///
    /// The checks run against a snapshot read just before the insert. A booking
    /// that races past them is caught by the store's unique slot constraint and
    /// reported the same way as a slot found taken up front.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment for patient {} with doctor {} at {} {}",
            request.patient_id, request.doctor_id, request.date, request.time
        );

        if self.rules.require_availability_window
            && !self
                .availability_service
                .covers(request.doctor_id, request.date, request.time)
                .await?
        {
            warn!("Doctor {} has no availability at {} {}", request.doctor_id, request.date, request.time);
            return Err(AppointmentError::DoctorNotAvailable {
                doctor_id: request.doctor_id,
                date: request.date,
                time: request.time,
            });
        }

        let doctor_day = self
            .store
            .list_appointments_for_doctor(request.doctor_id, request.date)
            .await?;
        if let Some(holder) = find_slot_holder(request.doctor_id, request.date, request.time, &doctor_day) {
            warn!(
                "Slot {} {} for doctor {} already held by appointment {}",
                request.date, request.time, request.doctor_id, holder.id
            );
            return Err(AppointmentError::SlotNotAvailable {
                doctor_id: request.doctor_id,
                date: request.date,
                time: request.time,
            });
        }

        if self.rules.block_same_day_duplicates {
            let history = self
                .store
                .list_appointments_for_pair(request.patient_id, request.doctor_id)
                .await?;
            if has_prior_appointment(request.patient_id, request.doctor_id, request.date, &history) {
                warn!(
                    "Patient {} already booked with doctor {} on {}",
                    request.patient_id, request.doctor_id, request.date
                );
                return Err(AppointmentError::DuplicateBooking {
                    patient_id: request.patient_id,
                    doctor_id: request.doctor_id,
                    date: request.date,
                });
            }
        }

        let appointment = self
            .store
            .insert_appointment(NewAppointment {
                patient_id: request.patient_id,
                doctor_id: request.doctor_id,
                date: request.date,
                time: request.time,
                appointment_type: request.appointment_type,
                notes: request.notes,
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    warn!("Lost booking race for doctor {} at {} {}", request.doctor_id, request.date, request.time);
                    AppointmentError::SlotNotAvailable {
                        doctor_id: request.doctor_id,
                        date: request.date,
                        time: request.time,
                    }
                } else {
                    e.into()
                }
            })?;

        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment {}", appointment_id);

        self.store
            .get_appointment(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound(appointment_id))
    }

    /// Move an appointment to a new status, enforcing the lifecycle.
    ///
    /// The write only lands if the stored status is still the one validated
    /// here, so two concurrent terminal moves cannot both succeed.
    pub async fn update_status(
        &self,
        appointment_id: i64,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id).await?;

        self.lifecycle_service
            .validate_status_transition(&current.status, &new_status)?;

        let updated = match self
            .store
            .update_appointment_status(appointment_id, current.status, new_status)
            .await
        {
            Ok(updated) => updated,
            Err(e) if e.is_not_found() => return Err(AppointmentError::NotFound(appointment_id)),
            Err(e) if e.is_conflict() => {
                // another writer moved the appointment after our read
                let stored = self.get_appointment(appointment_id).await?;
                warn!(
                    "Appointment {} changed to {} concurrently, rejecting move to {}",
                    appointment_id, stored.status, new_status
                );
                return Err(AppointmentError::InvalidStateTransition {
                    from: stored.status,
                    to: new_status,
                });
            }
            Err(e) => return Err(e.into()),
        };

        info!("Appointment {} moved from {} to {}", appointment_id, current.status, new_status);
        Ok(updated)
    }

    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.update_status(appointment_id, AppointmentStatus::Cancelled).await
    }

    pub async fn complete_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.update_status(appointment_id, AppointmentStatus::Completed).await
    }

    pub async fn mark_no_show(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.update_status(appointment_id, AppointmentStatus::NoShow).await
    }
}
