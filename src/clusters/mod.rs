//! Cluster facades exposed to the host framework.
//!
//! A facade owns the attribute values of one logical cluster. The host reads
//! them through [`ClusterFacade`]; the dispatcher and bus listeners write
//! them through `update_attribute`.

use crate::error::Result;
use crate::zcl::{AttributeCache, AttributeValue};

pub mod ias_zone;
pub mod illuminance;
pub mod rain_sensor;

pub use ias_zone::{TuyaIasZone, ZoneType};
pub use illuminance::TuyaIlluminanceCluster;
pub use rain_sensor::TuyaSolarRainSensorCluster;

/// A logical cluster with typed, named attributes.
pub trait ClusterFacade: Send + Sync {
    /// ZCL cluster ID.
    fn cluster_id(&self) -> u16;

    /// Name the cluster is known by on its endpoint (mapping tables refer to it).
    fn ep_attribute(&self) -> &'static str;

    fn attributes(&self) -> &AttributeCache;

    /// Store a new attribute value. Returns whether the value changed.
    ///
    /// Facades override this to react to specific attributes.
    fn update_attribute(&self, attr_id: u16, value: AttributeValue) -> Result<bool> {
        self.attributes().update(attr_id, value)
    }

    fn read_attribute(&self, attr_id: u16) -> Option<AttributeValue> {
        self.attributes().get(attr_id)
    }

    fn read_attribute_by_name(&self, name: &str) -> Option<AttributeValue> {
        let def = self.attributes().def_by_name(name)?;
        self.attributes().get(def.id)
    }

    /// Change counter for subscription updates.
    fn version(&self) -> u32 {
        self.attributes().version()
    }
}
