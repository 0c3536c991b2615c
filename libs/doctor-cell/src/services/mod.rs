pub mod availability;
pub mod overlap;

pub use availability::AvailabilityService;
pub use overlap::{find_conflicts, has_conflict, intervals_overlap, validate_window};
