// libs/doctor-cell/src/services/availability.rs

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

use shared_config::{AppConfig, SchedulingRules};
use shared_database::{NewAvailabilityWindow, SchedulingStore};
use shared_models::{AppError, AvailabilityWindow, DayOfWeek};

use crate::models::{AvailabilityError, CreateAvailabilityRequest, UpdateAvailabilityRequest};
use crate::services::overlap::{find_conflicts, validate_window};

pub struct AvailabilityService<S: SchedulingStore> {
    store: Arc<S>,
    rules: SchedulingRules,
}

impl<S: SchedulingStore> AvailabilityService<S> {
    pub fn new(store: Arc<S>, config: &AppConfig) -> Self {
        Self::with_rules(store, config.scheduling.clone())
    }

    pub fn with_rules(store: Arc<S>, rules: SchedulingRules) -> Self {
        Self { store, rules }
    }

    /// Create availability schedule for a doctor
    pub async fn create_availability(
        &self,
        doctor_id: i64,
        request: CreateAvailabilityRequest,
    ) -> Result<AvailabilityWindow, AvailabilityError> {
        debug!("Creating availability for doctor {} on {}", doctor_id, request.day_of_week);

        validate_window(request.start_time, request.end_time)?;

        let existing = self.store.list_availability_windows(doctor_id).await?;
        self.check_availability_conflicts(
            doctor_id,
            request.day_of_week,
            request.start_time,
            request.end_time,
            None,
            &existing,
        )?;

        let window = self
            .store
            .insert_availability_window(NewAvailabilityWindow {
                doctor_id,
                day_of_week: request.day_of_week,
                start_time: request.start_time,
                end_time: request.end_time,
                active: request.active.unwrap_or(true),
            })
            .await?;

        info!("Availability {} created for doctor {}", window.id, doctor_id);
        Ok(window)
    }

    /// Update availability schedule
    pub async fn update_availability(
        &self,
        window_id: i64,
        request: UpdateAvailabilityRequest,
    ) -> Result<AvailabilityWindow, AvailabilityError> {
        debug!("Updating availability: {}", window_id);

        let current = self
            .store
            .get_availability_window(window_id)
            .await?
            .ok_or(AvailabilityError::NotFound(window_id))?;

        let updated = request.merge_into(&current);
        validate_window(updated.start_time, updated.end_time)?;

        let existing = self.store.list_availability_windows(current.doctor_id).await?;
        self.check_availability_conflicts(
            updated.doctor_id,
            updated.day_of_week,
            updated.start_time,
            updated.end_time,
            Some(window_id),
            &existing,
        )?;

        let saved = self
            .store
            .update_availability_window(updated)
            .await
            .map_err(|e| not_found_or(e, window_id))?;

        info!("Availability {} updated", window_id);
        Ok(saved)
    }

    pub async fn delete_availability(&self, window_id: i64) -> Result<(), AvailabilityError> {
        debug!("Deleting availability: {}", window_id);

        self.store
            .delete_availability_window(window_id)
            .await
            .map_err(|e| not_found_or(e, window_id))?;

        info!("Availability {} deleted", window_id);
        Ok(())
    }

    /// Get doctor's availability schedules, ordered by weekday then start time
    pub async fn get_doctor_availability(
        &self,
        doctor_id: i64,
    ) -> Result<Vec<AvailabilityWindow>, AvailabilityError> {
        debug!("Fetching availability for doctor: {}", doctor_id);

        let mut windows = self.store.list_availability_windows(doctor_id).await?;
        windows.sort_by_key(|w| (w.day_of_week, w.start_time, w.id));
        Ok(windows)
    }

    /// Whether an active window on the date's weekday contains `time`
    pub async fn covers(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AvailabilityError> {
        let day = DayOfWeek::of(date);
        let windows = self.store.list_availability_windows(doctor_id).await?;

        let covered = windows
            .iter()
            .any(|w| w.active && w.day_of_week == day && w.contains(time));

        debug!("Doctor {} availability on {} {} {}: {}", doctor_id, day, date, time, covered);
        Ok(covered)
    }

    fn check_availability_conflicts(
        &self,
        doctor_id: i64,
        day: DayOfWeek,
        start: NaiveTime,
        end: NaiveTime,
        exclude_id: Option<i64>,
        existing: &[AvailabilityWindow],
    ) -> Result<(), AvailabilityError> {
        let conflicts = find_conflicts(doctor_id, day, start, end, exclude_id, existing);
        if !conflicts.is_empty() {
            warn!(
                "Availability {}-{} on {} for doctor {} overlaps windows {:?}",
                start,
                end,
                day,
                doctor_id,
                conflicts.iter().map(|w| w.id).collect::<Vec<_>>()
            );
            return Err(AvailabilityError::SchedulingConflict { conflicts });
        }

        if self.rules.single_window_per_day {
            let day_taken = existing
                .iter()
                .any(|w| w.doctor_id == doctor_id && w.day_of_week == day && Some(w.id) != exclude_id);
            if day_taken {
                warn!("Doctor {} already has a window on {}", doctor_id, day);
                return Err(AvailabilityError::DayAlreadyCovered(day));
            }
        }

        Ok(())
    }
}

fn not_found_or(err: AppError, window_id: i64) -> AvailabilityError {
    if err.is_not_found() {
        AvailabilityError::NotFound(window_id)
    } else {
        err.into()
    }
}
