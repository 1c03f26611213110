//! Zigbee Cluster Library definitions shared by the quirks.
//!
//! Cluster and device identifiers, plus the typed attribute model that
//! cluster facades expose to the host framework.

pub mod attribute;
pub mod cache;

pub use attribute::{Access, AttributeDef, AttributeType, AttributeValue};
pub use cache::AttributeCache;

/// Zigbee Home Automation profile.
pub const ZHA_PROFILE_ID: u16 = 0x0104;

/// ZCL cluster IDs used by the supported devices
pub mod cluster_id {
    // General
    pub const BASIC: u16 = 0x0000;
    pub const POWER_CONFIGURATION: u16 = 0x0001;
    pub const IDENTIFY: u16 = 0x0003;
    pub const GROUPS: u16 = 0x0004;
    pub const SCENES: u16 = 0x0005;
    pub const ON_OFF: u16 = 0x0006;
    pub const TIME: u16 = 0x000A;
    pub const OTA: u16 = 0x0019;

    // Measurement
    pub const ILLUMINANCE_MEASUREMENT: u16 = 0x0400;

    // Security
    pub const IAS_ZONE: u16 = 0x0500;

    // Touchlink
    pub const LIGHTLINK: u16 = 0x1000;

    // Manufacturer specific
    pub const TUYA_MCU: u16 = 0xEF00;
}

/// ZHA device type IDs
pub mod device_type {
    pub const IAS_ZONE: u16 = 0x0402;
}
