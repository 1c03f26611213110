//! Tuya MCU datapoint handling.
//!
//! - `datapoint`: typed datapoint values and JSON reports
//! - `mapping`: per-model datapoint to attribute tables
//! - `dispatcher`: applies reports to cluster facades

pub mod datapoint;
pub mod dispatcher;
pub mod mapping;

pub use datapoint::{DpReport, DpType, DpValue};
pub use dispatcher::{DatapointDispatcher, DispatchOutcome};
pub use mapping::{DpConverter, DpMappingTable, DpToAttributeMapping};
