pub mod memory;
pub mod store;

pub use memory::InMemorySchedulingStore;
pub use store::{NewAppointment, NewAvailabilityWindow, SchedulingStore};

#[cfg(feature = "mock")]
pub use store::MockSchedulingStore;
