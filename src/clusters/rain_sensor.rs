//! Tuya manufacturer cluster (0xEF00) of the TS0207 solar rain sensor.
//!
//! Holds the vendor datapoints that have no standard ZCL home. Light
//! intensity is additionally announced on the device bus so the
//! Illuminance Measurement facade can mirror it.

use super::ClusterFacade;
use crate::bus::{Bus, DeviceEvent};
use crate::error::Result;
use crate::tuya::{DpMappingTable, DpToAttributeMapping};
use crate::zcl::{AttributeCache, AttributeDef, AttributeType, AttributeValue, cluster_id};
use std::sync::Arc;
use strum::FromRepr;

/// Endpoint attribute name of the manufacturer cluster.
pub const EP_ATTRIBUTE: &str = "tuya_manufacturer";

/// Manufacturer-specific attribute IDs
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u16)]
pub enum RainSensorAttribute {
    /// Instantaneous light intensity (raw device units)
    LightIntensity = 0xEF65,
    AverageLightIntensity20Mins = 0xEF66,
    TodaysMaxLightIntensity = 0xEF67,
    /// Solar panel needs cleaning
    CleaningReminder = 0xEF68,
    RainSensorVoltage = 0xEF69,
}

static ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(
        RainSensorAttribute::LightIntensity as u16,
        "light_intensity",
        AttributeType::U32,
    )
    .manufacturer_specific(),
    AttributeDef::new(
        RainSensorAttribute::AverageLightIntensity20Mins as u16,
        "average_light_intensity_20mins",
        AttributeType::U32,
    )
    .manufacturer_specific(),
    AttributeDef::new(
        RainSensorAttribute::TodaysMaxLightIntensity as u16,
        "todays_max_light_intensity",
        AttributeType::U32,
    )
    .manufacturer_specific(),
    AttributeDef::new(
        RainSensorAttribute::CleaningReminder as u16,
        "cleaning_reminder",
        AttributeType::Bool,
    )
    .manufacturer_specific(),
    AttributeDef::new(
        RainSensorAttribute::RainSensorVoltage as u16,
        "rain_sensor_voltage",
        AttributeType::U32,
    )
    .manufacturer_specific(),
];

static DP_TO_ATTRIBUTE: &[(u8, DpToAttributeMapping)] = &[
    (101, DpToAttributeMapping::new(EP_ATTRIBUTE, "light_intensity")),
    (102, DpToAttributeMapping::new(EP_ATTRIBUTE, "average_light_intensity_20mins")),
    (103, DpToAttributeMapping::new(EP_ATTRIBUTE, "todays_max_light_intensity")),
    (104, DpToAttributeMapping::new(EP_ATTRIBUTE, "cleaning_reminder")),
    (105, DpToAttributeMapping::new(EP_ATTRIBUTE, "rain_sensor_voltage")),
];

pub struct TuyaSolarRainSensorCluster {
    cache: AttributeCache,
    bus: Arc<Bus>,
}

impl TuyaSolarRainSensorCluster {
    pub fn new(bus: Arc<Bus>) -> Self {
        Self {
            cache: AttributeCache::new(EP_ATTRIBUTE, ATTRIBUTES),
            bus,
        }
    }

    /// Datapoint table for this cluster.
    pub fn dp_to_attribute() -> Result<DpMappingTable> {
        DpMappingTable::new(DP_TO_ATTRIBUTE)
    }

    pub fn light_intensity(&self) -> Option<u32> {
        self.read_attribute(RainSensorAttribute::LightIntensity as u16)
            .and_then(|v| v.as_u32())
    }

    pub fn cleaning_reminder(&self) -> Option<bool> {
        self.read_attribute(RainSensorAttribute::CleaningReminder as u16)
            .and_then(|v| v.as_bool())
    }
}

impl ClusterFacade for TuyaSolarRainSensorCluster {
    fn cluster_id(&self) -> u16 {
        cluster_id::TUYA_MCU
    }

    fn ep_attribute(&self) -> &'static str {
        EP_ATTRIBUTE
    }

    fn attributes(&self) -> &AttributeCache {
        &self.cache
    }

    fn update_attribute(&self, attr_id: u16, value: AttributeValue) -> Result<bool> {
        let changed = self.cache.update(attr_id, value)?;

        // Announce the raw reading; calibration belongs to the listener
        if RainSensorAttribute::from_repr(attr_id) == Some(RainSensorAttribute::LightIntensity)
            && let AttributeValue::U32(raw) = value
        {
            self.bus.publish(&DeviceEvent::IlluminanceReported(raw));
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{BusListener, EventKind};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<DeviceEvent>>,
    }

    impl BusListener for Recorder {
        fn listener_name(&self) -> &'static str {
            "recorder"
        }

        fn on_event(&self, event: &DeviceEvent) -> Result<()> {
            self.seen.lock().push(event.clone());
            Ok(())
        }
    }

    fn cluster_with_recorder() -> (TuyaSolarRainSensorCluster, Arc<Recorder>) {
        let bus = Arc::new(Bus::new());
        let recorder = Arc::new(Recorder::default());
        bus.subscribe(EventKind::IlluminanceReported, recorder.clone());
        (TuyaSolarRainSensorCluster::new(bus), recorder)
    }

    #[test]
    fn test_light_intensity_is_announced_raw() {
        let (cluster, recorder) = cluster_with_recorder();

        cluster
            .update_attribute(RainSensorAttribute::LightIntensity as u16, AttributeValue::U32(50))
            .unwrap();

        assert_eq!(cluster.light_intensity(), Some(50));
        assert_eq!(*recorder.seen.lock(), vec![DeviceEvent::IlluminanceReported(50)]);
    }

    #[test]
    fn test_other_attributes_are_not_announced() {
        let (cluster, recorder) = cluster_with_recorder();

        cluster
            .update_attribute(RainSensorAttribute::CleaningReminder as u16, AttributeValue::Bool(true))
            .unwrap();
        cluster
            .update_attribute(RainSensorAttribute::RainSensorVoltage as u16, AttributeValue::U32(3300))
            .unwrap();

        assert_eq!(cluster.cleaning_reminder(), Some(true));
        assert!(recorder.seen.lock().is_empty());
    }

    #[test]
    fn test_rejected_update_is_not_announced() {
        let (cluster, recorder) = cluster_with_recorder();

        assert!(
            cluster
                .update_attribute(RainSensorAttribute::LightIntensity as u16, AttributeValue::Bool(true))
                .is_err()
        );
        assert_eq!(cluster.light_intensity(), None);
        assert!(recorder.seen.lock().is_empty());
    }

    #[test]
    fn test_mapping_table_covers_all_attributes() {
        let table = TuyaSolarRainSensorCluster::dp_to_attribute().unwrap();
        assert_eq!(table.datapoints(), vec![101, 102, 103, 104, 105]);
        for dp in table.datapoints() {
            let mapping = table.get(dp).unwrap();
            assert_eq!(mapping.ep_attribute, EP_ATTRIBUTE);
            assert!(ATTRIBUTES.iter().any(|d| d.name == mapping.attribute_name));
        }
    }
}
