//! Tuya datapoint bridge library.
//!
//! Translates vendor datapoint reports from Tuya MCU devices into the ZCL
//! attribute model a home-automation host understands, including values
//! that one cluster derives from another over a per-device event bus.

pub mod bus;
pub mod clusters;
pub mod config;
pub mod device;
pub mod error;
pub mod input;
pub mod tuya;
pub mod zcl;
