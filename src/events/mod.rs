// src/events/mod.rs
//
// Event plumbing: the bus and the events carried on it.

pub mod bus;
pub mod types;

pub use bus::{EventBus, Subscription};
pub use types::{MediaEvent, SurfaceEvent};
