//! Quirk selection by manufacturer and model.

use super::{DeviceSignature, Quirk, TuyaSolarRainSensor, ts0207};
use crate::error::Result;
use log::{debug, info};
use std::sync::Arc;

/// Builds a fresh device instance.
pub type QuirkConstructor = fn() -> Result<Arc<dyn Quirk>>;

pub struct QuirkEntry {
    pub signature: &'static DeviceSignature,
    pub build: QuirkConstructor,
}

/// Known quirks, matched in registration order.
#[derive(Default)]
pub struct QuirkRegistry {
    entries: Vec<QuirkEntry>,
}

fn build_ts0207() -> Result<Arc<dyn Quirk>> {
    Ok(Arc::new(TuyaSolarRainSensor::new()?))
}

impl QuirkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every quirk shipped in this crate.
    pub fn with_builtin() -> Self {
        Self::new().with_quirk(&ts0207::SIGNATURE, build_ts0207)
    }

    pub fn with_quirk(mut self, signature: &'static DeviceSignature, build: QuirkConstructor) -> Self {
        self.entries.push(QuirkEntry { signature, build });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, manufacturer: &str, model: &str) -> Option<&QuirkEntry> {
        self.entries
            .iter()
            .find(|e| e.signature.matches_model(manufacturer, model))
    }

    /// Build a new instance for the given device, or `None` if no quirk applies.
    pub fn build(&self, manufacturer: &str, model: &str) -> Result<Option<Arc<dyn Quirk>>> {
        let Some(entry) = self.find(manufacturer, model) else {
            debug!("No quirk for {} / {}", manufacturer, model);
            return Ok(None);
        };
        let quirk = (entry.build)()?;
        info!("Applied {} to {} / {}", quirk.name(), manufacturer, model);
        Ok(Some(quirk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuya::DpValue;
    use crate::zcl::cluster_id;

    #[test]
    fn test_builtin_selects_ts0207() {
        let registry = QuirkRegistry::with_builtin();
        assert_eq!(registry.len(), 1);

        let quirk = registry.build("_TZ3210_tgvtvdoc", "TS0207").unwrap().unwrap();
        assert_eq!(quirk.name(), "TuyaSolarRainSensor");
    }

    #[test]
    fn test_unknown_model() {
        let registry = QuirkRegistry::with_builtin();
        assert!(registry.build("_TZ3210_tgvtvdoc", "TS0601").unwrap().is_none());
        assert!(QuirkRegistry::new().find("_TZ3210_tgvtvdoc", "TS0207").is_none());
    }

    #[test]
    fn test_builds_are_independent() {
        let registry = QuirkRegistry::with_builtin();
        let a = registry.build("_TZ3210_tgvtvdoc", "TS0207").unwrap().unwrap();
        let b = registry.build("_TZ3210_tgvtvdoc", "TS0207").unwrap().unwrap();

        a.report(101, DpValue::Value(4));

        let read = |q: &Arc<dyn Quirk>| {
            q.cluster(ts0207::ENDPOINT_ID, cluster_id::ILLUMINANCE_MEASUREMENT)
                .and_then(|c| c.read_attribute_by_name("measured_value"))
        };
        assert!(read(&a).is_some());
        assert!(read(&b).is_none());
    }
}
