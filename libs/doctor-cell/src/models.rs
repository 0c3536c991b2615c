use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::{AppError, AvailabilityWindow, DayOfWeek};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub active: Option<bool>,
}

impl UpdateAvailabilityRequest {
    /// Apply the provided fields over an existing window
    pub fn merge_into(&self, current: &AvailabilityWindow) -> AvailabilityWindow {
        AvailabilityWindow {
            id: current.id,
            doctor_id: current.doctor_id,
            day_of_week: self.day_of_week.unwrap_or(current.day_of_week),
            start_time: self.start_time.unwrap_or(current.start_time),
            end_time: self.end_time.unwrap_or(current.end_time),
            active: self.active.unwrap_or(current.active),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AvailabilityError {
    #[error("Start time {start} must be before end time {end}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("Availability conflicts with {} existing window(s)", .conflicts.len())]
    SchedulingConflict { conflicts: Vec<AvailabilityWindow> },

    #[error("Doctor already has availability on {0}")]
    DayAlreadyCovered(DayOfWeek),

    #[error("Availability window {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<AppError> for AvailabilityError {
    fn from(err: AppError) -> Self {
        AvailabilityError::Database(err.to_string())
    }
}
