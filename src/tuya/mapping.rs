//! Datapoint to attribute mapping tables.

use super::DpValue;
use crate::error::{QuirkError, Result};
use std::collections::HashMap;

/// Optional transform applied to a datapoint before type coercion.
pub type DpConverter = fn(DpValue) -> DpValue;

/// Where a datapoint lands: a named attribute on a named cluster facade.
#[derive(Clone, Copy, Debug)]
pub struct DpToAttributeMapping {
    /// Endpoint attribute name of the target cluster (e.g. `tuya_manufacturer`)
    pub ep_attribute: &'static str,
    /// Attribute name on the target cluster
    pub attribute_name: &'static str,
    pub converter: Option<DpConverter>,
}

impl DpToAttributeMapping {
    pub const fn new(ep_attribute: &'static str, attribute_name: &'static str) -> Self {
        Self {
            ep_attribute,
            attribute_name,
            converter: None,
        }
    }

    pub const fn with_converter(mut self, converter: DpConverter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Apply the converter, if any.
    pub fn convert(&self, value: DpValue) -> DpValue {
        match self.converter {
            Some(convert) => convert(value),
            None => value,
        }
    }
}

/// Immutable datapoint table for one device model.
#[derive(Debug, Default)]
pub struct DpMappingTable {
    entries: HashMap<u8, DpToAttributeMapping>,
}

impl DpMappingTable {
    /// Build a table, rejecting duplicate datapoint ids.
    pub fn new(entries: &[(u8, DpToAttributeMapping)]) -> Result<Self> {
        let mut table = HashMap::with_capacity(entries.len());
        for (dp, mapping) in entries {
            if table.insert(*dp, *mapping).is_some() {
                return Err(QuirkError::DuplicateDatapoint(*dp));
            }
        }
        Ok(Self { entries: table })
    }

    pub fn get(&self, dp: u8) -> Option<&DpToAttributeMapping> {
        self.entries.get(&dp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mapped datapoint ids in ascending order.
    pub fn datapoints(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
