//! IAS Zone cluster (0x0500) for the rain sensor.
//!
//! Rain detection arrives through the standard zone status report; the only
//! quirk here is pinning `zone_type` to Water_Sensor.

use super::ClusterFacade;
use crate::zcl::{AttributeCache, AttributeDef, AttributeType, AttributeValue, cluster_id};
use strum::{Display, FromRepr};

pub const EP_ATTRIBUTE: &str = "ias_zone";

/// Attribute IDs for the IAS Zone cluster
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u16)]
pub enum IasZoneAttribute {
    ZoneState = 0x0000,
    ZoneType = 0x0001,
    ZoneStatus = 0x0002,
}

/// IAS zone types
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr, Display)]
#[repr(u16)]
pub enum ZoneType {
    StandardCie = 0x0000,
    MotionSensor = 0x000D,
    ContactSwitch = 0x0015,
    FireSensor = 0x0028,
    WaterSensor = 0x002A,
    CarbonMonoxideSensor = 0x002B,
    PersonalEmergencyDevice = 0x002C,
    VibrationMovementSensor = 0x002D,
    RemoteControl = 0x010F,
    KeyFob = 0x0115,
    Keypad = 0x021D,
    StandardWarningDevice = 0x0225,
    GlassBreakSensor = 0x0226,
    SecurityRepeater = 0x0229,
    Invalid = 0xFFFF,
}

/// Zone status bits
pub mod zone_status {
    pub const ALARM_1: u16 = 0x0001;
    pub const ALARM_2: u16 = 0x0002;
    pub const TAMPER: u16 = 0x0004;
    pub const BATTERY: u16 = 0x0008;
}

static ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(
        IasZoneAttribute::ZoneState as u16,
        "zone_state",
        AttributeType::Enum8,
    ),
    AttributeDef::new(
        IasZoneAttribute::ZoneType as u16,
        "zone_type",
        AttributeType::Enum16,
    )
    .constant(),
    AttributeDef::new(
        IasZoneAttribute::ZoneStatus as u16,
        "zone_status",
        AttributeType::Bitmap16,
    ),
];

pub struct TuyaIasZone {
    cache: AttributeCache,
}

impl TuyaIasZone {
    pub const ZONE_TYPE: ZoneType = ZoneType::WaterSensor;

    pub fn new() -> Self {
        Self {
            cache: AttributeCache::with_constants(
                EP_ATTRIBUTE,
                ATTRIBUTES,
                &[(
                    IasZoneAttribute::ZoneType as u16,
                    AttributeValue::Enum16(Self::ZONE_TYPE as u16),
                )],
            ),
        }
    }

    pub fn zone_type(&self) -> Option<ZoneType> {
        match self.read_attribute(IasZoneAttribute::ZoneType as u16) {
            Some(AttributeValue::Enum16(v)) => ZoneType::from_repr(v),
            _ => None,
        }
    }

    pub fn zone_status(&self) -> u16 {
        match self.read_attribute(IasZoneAttribute::ZoneStatus as u16) {
            Some(AttributeValue::Bitmap16(v)) => v,
            _ => 0,
        }
    }

    /// Alarm 1 is raised while the sensor detects rain.
    pub fn is_raining(&self) -> bool {
        self.zone_status() & zone_status::ALARM_1 != 0
    }
}

impl Default for TuyaIasZone {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterFacade for TuyaIasZone {
    fn cluster_id(&self) -> u16 {
        cluster_id::IAS_ZONE
    }

    fn ep_attribute(&self) -> &'static str {
        EP_ATTRIBUTE
    }

    fn attributes(&self) -> &AttributeCache {
        &self.cache
    }
}
