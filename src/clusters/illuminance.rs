//! Illuminance Measurement cluster (0x0400) fed from the device bus.
//!
//! The device never reports this cluster itself. Its `measured_value` is
//! derived from the manufacturer cluster's light intensity, scaled by
//! [`TuyaIlluminanceCluster::CALIBRATION_FACTOR`].
//!
//! The host renders `measured_value` to lux with
//! `round(10 ^ ((value - 1) / 10000))`. The factor only roughly
//! pre-compensates for that curve; there is no exact inverse.

use super::ClusterFacade;
use crate::bus::{Bus, BusListener, DeviceEvent, EventKind};
use crate::error::{QuirkError, Result};
use crate::zcl::{AttributeCache, AttributeDef, AttributeType, AttributeValue, cluster_id};
use log::debug;
use std::sync::Arc;
use strum::FromRepr;

pub const EP_ATTRIBUTE: &str = "illuminance";

/// Attribute IDs for the Illuminance Measurement cluster
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u16)]
pub enum IlluminanceAttribute {
    MeasuredValue = 0x0000,
    MinMeasuredValue = 0x0001,
    MaxMeasuredValue = 0x0002,
}

/// Largest `measured_value` the cluster can hold.
pub const MAX_MEASURED_VALUE: u32 = u32::MAX;

static ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(
        IlluminanceAttribute::MeasuredValue as u16,
        "measured_value",
        AttributeType::U32,
    ),
    AttributeDef::new(
        IlluminanceAttribute::MinMeasuredValue as u16,
        "min_measured_value",
        AttributeType::U32,
    )
    .constant(),
    AttributeDef::new(
        IlluminanceAttribute::MaxMeasuredValue as u16,
        "max_measured_value",
        AttributeType::U32,
    )
    .constant(),
];

pub struct TuyaIlluminanceCluster {
    cache: AttributeCache,
}

impl TuyaIlluminanceCluster {
    /// Very approximate adjustment, do not expect this to be accurate.
    pub const CALIBRATION_FACTOR: u32 = 7;

    /// Create the cluster and subscribe it to illuminance events on `bus`.
    ///
    /// The only way to obtain the cluster, so it is always listening.
    pub fn attach(bus: &Bus) -> Arc<Self> {
        let cluster = Arc::new(Self {
            cache: AttributeCache::with_constants(
                EP_ATTRIBUTE,
                ATTRIBUTES,
                &[
                    (
                        IlluminanceAttribute::MinMeasuredValue as u16,
                        AttributeValue::U32(1),
                    ),
                    (
                        IlluminanceAttribute::MaxMeasuredValue as u16,
                        AttributeValue::U32(MAX_MEASURED_VALUE),
                    ),
                ],
            ),
        });
        bus.subscribe(EventKind::IlluminanceReported, cluster.clone());
        debug!("TuyaIlluminanceCluster attached to bus");
        cluster
    }

    /// Scale a raw reading into the value stored as `measured_value`.
    ///
    /// `None` if the product does not fit in 32 bits.
    pub fn calibrate(raw: u32) -> Option<u32> {
        raw.checked_mul(Self::CALIBRATION_FACTOR)
    }

    /// Apply a raw light intensity reading.
    ///
    /// A reading too large to calibrate leaves `measured_value` untouched.
    pub fn illuminance_reported(&self, raw: u32) -> Result<()> {
        let calibrated = Self::calibrate(raw).ok_or(QuirkError::OutOfRange {
            attribute: "measured_value",
            expected: AttributeType::U32,
            value: i64::from(raw) * i64::from(Self::CALIBRATION_FACTOR),
        })?;
        self.cache.update(
            IlluminanceAttribute::MeasuredValue as u16,
            AttributeValue::U32(calibrated),
        )?;
        debug!("measured_value updated: {} (raw {})", calibrated, raw);
        Ok(())
    }

    pub fn measured_value(&self) -> Option<u32> {
        match self.read_attribute(IlluminanceAttribute::MeasuredValue as u16) {
            Some(AttributeValue::U32(v)) => Some(v),
            _ => None,
        }
    }
}

impl ClusterFacade for TuyaIlluminanceCluster {
    fn cluster_id(&self) -> u16 {
        cluster_id::ILLUMINANCE_MEASUREMENT
    }

    fn ep_attribute(&self) -> &'static str {
        EP_ATTRIBUTE
    }

    fn attributes(&self) -> &AttributeCache {
        &self.cache
    }
}

impl BusListener for TuyaIlluminanceCluster {
    fn listener_name(&self) -> &'static str {
        "TuyaIlluminanceCluster"
    }

    fn on_event(&self, event: &DeviceEvent) -> Result<()> {
        match event {
            DeviceEvent::IlluminanceReported(raw) => self.illuminance_reported(*raw),
        }
    }
}
