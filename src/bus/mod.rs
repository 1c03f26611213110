//! In-process event bus connecting the cluster facades of one device.
//!
//! A device builds its [`Bus`] before any facade and hands it to each facade
//! constructor; listeners subscribe while being built.

pub mod events;
pub mod registry;

pub use events::{DeviceEvent, EventKind};
pub use registry::{Bus, BusListener};
