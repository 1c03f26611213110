//! MQTT input source for Tuya datapoint reports.
//!
//! Reports arrive already decoded from the Tuya MCU framing, one JSON object
//! per message, and are handed to the device quirk they belong to.

mod client;
mod integration;

pub use client::{MqttClient, MqttMessage};
pub use integration::MqttIntegration;
