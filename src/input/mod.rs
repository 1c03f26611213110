//! Input sources for the bridge.
//!
//! Current input sources:
//! - `mqtt`: datapoint reports published to an MQTT broker

pub mod mqtt;
