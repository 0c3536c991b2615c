pub mod booking;
pub mod conflict;
pub mod lifecycle;

pub use booking::AppointmentBookingService;
pub use conflict::{find_slot_holder, has_prior_appointment, is_slot_taken};
pub use lifecycle::AppointmentLifecycleService;
