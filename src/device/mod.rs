//! Device quirks.
//!
//! A quirk pairs static topology (which device it applies to, which clusters
//! the host should expose) with a live instance that accepts datapoint
//! reports and serves cluster facades.

pub mod registry;
pub mod topology;
pub mod ts0207;

use crate::clusters::ClusterFacade;
use crate::tuya::{DispatchOutcome, DpValue};
use std::sync::Arc;

pub use registry::QuirkRegistry;
pub use topology::{ClusterRef, DeviceReplacement, DeviceSignature, EndpointDescriptor, ModelInfo};
pub use ts0207::TuyaSolarRainSensor;

/// A device instance the host drives.
///
/// Each instance owns its bus and facades; nothing is shared between
/// instances, so separate devices may be driven from separate tasks.
pub trait Quirk: Send + Sync {
    fn name(&self) -> &'static str;

    fn signature(&self) -> &'static DeviceSignature;

    fn replacement(&self) -> &'static DeviceReplacement;

    /// Apply one decoded datapoint report.
    fn report(&self, dp: u8, value: DpValue) -> DispatchOutcome;

    /// Facade serving `cluster_id` on `endpoint_id`, if the quirk provides one.
    fn cluster(&self, endpoint_id: u8, cluster_id: u16) -> Option<Arc<dyn ClusterFacade>>;
}
