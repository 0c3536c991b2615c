use chrono::{NaiveDate, NaiveTime};

use shared_config::{AppConfig, SchedulingRules};
use shared_models::{
    Appointment, AppointmentStatus, AppointmentType, AvailabilityWindow, DayOfWeek,
};

/// Scheduling rules for tests, defaulting to the production defaults.
pub struct TestConfig {
    pub single_window_per_day: bool,
    pub block_same_day_duplicates: bool,
    pub require_availability_window: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        let rules = SchedulingRules::default();
        Self {
            single_window_per_day: rules.single_window_per_day,
            block_same_day_duplicates: rules.block_same_day_duplicates,
            require_availability_window: rules.require_availability_window,
        }
    }
}

impl TestConfig {
    pub fn permissive() -> Self {
        Self {
            single_window_per_day: false,
            block_same_day_duplicates: false,
            require_availability_window: false,
        }
    }

    pub fn to_rules(&self) -> SchedulingRules {
        SchedulingRules {
            single_window_per_day: self.single_window_per_day,
            block_same_day_duplicates: self.block_same_day_duplicates,
            require_availability_window: self.require_availability_window,
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            log_filter: "debug".to_string(),
            scheduling: self.to_rules(),
        }
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
}

pub struct TestRows;

impl TestRows {
    pub fn window(
        id: i64,
        doctor_id: i64,
        day_of_week: DayOfWeek,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AvailabilityWindow {
        AvailabilityWindow {
            id,
            doctor_id,
            day_of_week,
            start_time: start,
            end_time: end,
            active: true,
        }
    }

    pub fn appointment(
        id: i64,
        patient_id: i64,
        doctor_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        status: AppointmentStatus,
    ) -> Appointment {
        Appointment {
            id,
            patient_id,
            doctor_id,
            date,
            time,
            status,
            appointment_type: AppointmentType::InPerson,
            notes: None,
        }
    }
}
