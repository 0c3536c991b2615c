use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, warn};

/// Business rules the scheduling services apply on top of the conflict checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingRules {
    /// At most one availability window per doctor and weekday
    pub single_window_per_day: bool,
    /// Reject a second scheduled appointment between the same patient and doctor on one date
    pub block_same_day_duplicates: bool,
    /// Bookings must fall inside an active availability window
    pub require_availability_window: bool,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            single_window_per_day: false,
            block_same_day_duplicates: true,
            require_availability_window: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_filter: String,
    pub scheduling: SchedulingRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            scheduling: SchedulingRules::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SchedulingRules::default();

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| {
            debug!("RUST_LOG not set, using default");
            "info".to_string()
        });

        Self {
            log_filter,
            scheduling: SchedulingRules {
                single_window_per_day: read_flag(
                    &lookup,
                    "SCHEDULING_SINGLE_WINDOW_PER_DAY",
                    defaults.single_window_per_day,
                ),
                block_same_day_duplicates: read_flag(
                    &lookup,
                    "SCHEDULING_BLOCK_SAME_DAY_DUPLICATES",
                    defaults.block_same_day_duplicates,
                ),
                require_availability_window: read_flag(
                    &lookup,
                    "SCHEDULING_REQUIRE_AVAILABILITY_WINDOW",
                    defaults.require_availability_window,
                ),
            },
        }
    }
}

fn read_flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!("{} has invalid value {:?}, using default {}", key, raw, default);
                default
            }
        },
    }
}
