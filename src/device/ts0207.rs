//! Tuya TS0207 solar rain sensor.
//!
//! One endpoint carrying an IAS Zone (rain), the Tuya manufacturer cluster
//! (light and maintenance datapoints), and an Illuminance Measurement
//! cluster derived from the manufacturer cluster over the device bus.

use super::Quirk;
use super::topology::{ClusterRef, DeviceReplacement, DeviceSignature, EndpointDescriptor, ModelInfo};
use crate::bus::Bus;
use crate::clusters::{
    ClusterFacade, TuyaIasZone, TuyaIlluminanceCluster, TuyaSolarRainSensorCluster, ias_zone,
    illuminance, rain_sensor,
};
use crate::error::Result;
use crate::tuya::{DatapointDispatcher, DispatchOutcome, DpValue};
use crate::zcl::{ZHA_PROFILE_ID, cluster_id, device_type};
use log::debug;
use std::sync::Arc;

/// Endpoint hosting every cluster of this device
pub const ENDPOINT_ID: u8 = 1;

pub static SIGNATURE: DeviceSignature = DeviceSignature {
    models_info: &[ModelInfo::new("_TZ3210_tgvtvdoc", "TS0207")],
    endpoints: &[EndpointDescriptor {
        endpoint_id: ENDPOINT_ID,
        profile_id: ZHA_PROFILE_ID,
        device_type: device_type::IAS_ZONE,
        input_clusters: &[
            ClusterRef::Standard(cluster_id::BASIC),
            ClusterRef::Standard(cluster_id::POWER_CONFIGURATION),
            ClusterRef::Standard(cluster_id::GROUPS),
            ClusterRef::Standard(cluster_id::SCENES),
            ClusterRef::Standard(cluster_id::IAS_ZONE),
            ClusterRef::Standard(cluster_id::TUYA_MCU),
        ],
        output_clusters: &[
            ClusterRef::Standard(cluster_id::IDENTIFY),
            ClusterRef::Standard(cluster_id::GROUPS),
            ClusterRef::Standard(cluster_id::ON_OFF),
            ClusterRef::Standard(cluster_id::TIME),
            ClusterRef::Standard(cluster_id::OTA),
            ClusterRef::Standard(cluster_id::LIGHTLINK),
        ],
    }],
};

pub static REPLACEMENT: DeviceReplacement = DeviceReplacement {
    endpoints: &[EndpointDescriptor {
        endpoint_id: ENDPOINT_ID,
        profile_id: ZHA_PROFILE_ID,
        device_type: device_type::IAS_ZONE,
        input_clusters: &[
            ClusterRef::Standard(cluster_id::BASIC),
            ClusterRef::Standard(cluster_id::GROUPS),
            ClusterRef::Standard(cluster_id::SCENES),
            // Battery is reported by the MCU; binding only drains the device
            ClusterRef::custom_no_bind(cluster_id::POWER_CONFIGURATION, "power"),
            ClusterRef::custom(cluster_id::IAS_ZONE, ias_zone::EP_ATTRIBUTE),
            ClusterRef::custom(cluster_id::TUYA_MCU, rain_sensor::EP_ATTRIBUTE),
            ClusterRef::custom(cluster_id::ILLUMINANCE_MEASUREMENT, illuminance::EP_ATTRIBUTE),
        ],
        output_clusters: &[
            ClusterRef::Standard(cluster_id::TIME),
            ClusterRef::Standard(cluster_id::OTA),
        ],
    }],
};

/// A live TS0207 instance with its own bus and cluster facades.
pub struct TuyaSolarRainSensor {
    bus: Arc<Bus>,
    manufacturer: Arc<TuyaSolarRainSensorCluster>,
    illuminance: Arc<TuyaIlluminanceCluster>,
    ias_zone: Arc<TuyaIasZone>,
    dispatcher: DatapointDispatcher,
}

impl TuyaSolarRainSensor {
    /// Build the device: bus first, then the facades that use it.
    pub fn new() -> Result<Self> {
        let bus = Arc::new(Bus::new());
        debug!("Bus created");

        let illuminance = TuyaIlluminanceCluster::attach(&bus);
        let manufacturer = Arc::new(TuyaSolarRainSensorCluster::new(bus.clone()));
        let ias_zone = Arc::new(TuyaIasZone::new());

        let facades: [Arc<dyn ClusterFacade>; 3] = [
            manufacturer.clone(),
            illuminance.clone(),
            ias_zone.clone(),
        ];
        let dispatcher =
            DatapointDispatcher::new(TuyaSolarRainSensorCluster::dp_to_attribute()?, facades)?;

        Ok(Self {
            bus,
            manufacturer,
            illuminance,
            ias_zone,
            dispatcher,
        })
    }

    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    pub fn manufacturer_cluster(&self) -> &Arc<TuyaSolarRainSensorCluster> {
        &self.manufacturer
    }

    pub fn illuminance_cluster(&self) -> &Arc<TuyaIlluminanceCluster> {
        &self.illuminance
    }

    pub fn ias_zone_cluster(&self) -> &Arc<TuyaIasZone> {
        &self.ias_zone
    }
}

impl Quirk for TuyaSolarRainSensor {
    fn name(&self) -> &'static str {
        "TuyaSolarRainSensor"
    }

    fn signature(&self) -> &'static DeviceSignature {
        &SIGNATURE
    }

    fn replacement(&self) -> &'static DeviceReplacement {
        &REPLACEMENT
    }

    fn report(&self, dp: u8, value: DpValue) -> DispatchOutcome {
        self.dispatcher.dispatch(dp, value)
    }

    fn cluster(&self, endpoint_id: u8, cluster: u16) -> Option<Arc<dyn ClusterFacade>> {
        if endpoint_id != ENDPOINT_ID {
            return None;
        }
        match cluster {
            cluster_id::TUYA_MCU => Some(self.manufacturer.clone()),
            cluster_id::ILLUMINANCE_MEASUREMENT => Some(self.illuminance.clone()),
            cluster_id::IAS_ZONE => Some(self.ias_zone.clone()),
            _ => None,
        }
    }
}
