//! Datapoint dispatcher.
//!
//! Routes decoded `(dp, value)` reports to the attribute a device's mapping
//! table names. Nothing here is fatal: unknown datapoints and bad values are
//! logged and dropped so one malformed report never ends a device session.

use super::{DpMappingTable, DpValue};
use crate::clusters::ClusterFacade;
use crate::error::{QuirkError, Result};
use crate::zcl::AttributeValue;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of dispatching one report.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The mapped attribute now holds `value`.
    Updated {
        ep_attribute: &'static str,
        attribute: &'static str,
        value: AttributeValue,
    },
    /// No mapping for this datapoint.
    Ignored(u8),
    /// Mapping found but the value was not accepted; nothing changed.
    Rejected(QuirkError),
}

impl DispatchOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, DispatchOutcome::Updated { .. })
    }
}

pub struct DatapointDispatcher {
    table: DpMappingTable,
    targets: HashMap<&'static str, Arc<dyn ClusterFacade>>,
}

impl DatapointDispatcher {
    /// Create a dispatcher over the given facades.
    ///
    /// Every mapping must resolve to a known facade and attribute; this is
    /// checked once here so `dispatch` never meets a dangling mapping.
    pub fn new(
        table: DpMappingTable,
        facades: impl IntoIterator<Item = Arc<dyn ClusterFacade>>,
    ) -> Result<Self> {
        let targets: HashMap<_, _> = facades
            .into_iter()
            .map(|facade| (facade.ep_attribute(), facade))
            .collect();

        for dp in table.datapoints() {
            let Some(mapping) = table.get(dp) else {
                continue;
            };
            let facade = targets
                .get(mapping.ep_attribute)
                .ok_or(QuirkError::UnknownFacade(mapping.ep_attribute))?;
            if facade.attributes().def_by_name(mapping.attribute_name).is_none() {
                return Err(QuirkError::UnknownAttribute {
                    cluster: mapping.ep_attribute,
                    attribute: mapping.attribute_name.to_string(),
                });
            }
        }

        Ok(Self { table, targets })
    }

    pub fn table(&self) -> &DpMappingTable {
        &self.table
    }

    /// Apply one datapoint report.
    pub fn dispatch(&self, dp: u8, value: DpValue) -> DispatchOutcome {
        let Some(mapping) = self.table.get(dp) else {
            debug!("Ignoring unmapped datapoint {}: {:?}", dp, value);
            return DispatchOutcome::Ignored(dp);
        };

        match self.apply(dp, mapping.ep_attribute, mapping.attribute_name, mapping.convert(value)) {
            Ok(value) => {
                debug!(
                    "dp {} -> {}.{} = {:?}",
                    dp, mapping.ep_attribute, mapping.attribute_name, value
                );
                DispatchOutcome::Updated {
                    ep_attribute: mapping.ep_attribute,
                    attribute: mapping.attribute_name,
                    value,
                }
            }
            Err(e) => {
                warn!("Dropping report for datapoint {}: {}", dp, e);
                DispatchOutcome::Rejected(e)
            }
        }
    }

    fn apply(
        &self,
        dp: u8,
        ep_attribute: &'static str,
        attribute_name: &'static str,
        value: DpValue,
    ) -> Result<AttributeValue> {
        let facade = self
            .targets
            .get(ep_attribute)
            .ok_or(QuirkError::UnknownFacade(ep_attribute))?;
        let def = facade
            .attributes()
            .def_by_name(attribute_name)
            .ok_or_else(|| QuirkError::UnknownAttribute {
                cluster: ep_attribute,
                attribute: attribute_name.to_string(),
            })?;

        let value = value.to_attribute(def)?;
        let changed = facade.update_attribute(def.id, value)?;
        if !changed {
            debug!("dp {} repeated value for {}", dp, attribute_name);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuya::DpToAttributeMapping;
    use crate::zcl::{AttributeCache, AttributeDef, AttributeType};

    static DEFS: &[AttributeDef] = &[
        AttributeDef::new(0x0001, "level", AttributeType::U8),
        AttributeDef::new(0x0002, "flag", AttributeType::Bool),
    ];

    struct Plain {
        cache: AttributeCache,
    }

    impl ClusterFacade for Plain {
        fn cluster_id(&self) -> u16 {
            0xFC00
        }

        fn ep_attribute(&self) -> &'static str {
            "plain"
        }

        fn attributes(&self) -> &AttributeCache {
            &self.cache
        }
    }

    fn plain() -> Arc<Plain> {
        Arc::new(Plain {
            cache: AttributeCache::new("plain", DEFS),
        })
    }

    fn table() -> DpMappingTable {
        DpMappingTable::new(&[
            (1, DpToAttributeMapping::new("plain", "level")),
            (2, DpToAttributeMapping::new("plain", "flag")),
        ])
        .unwrap()
    }

    #[test]
    fn test_dispatch_updates_only_mapped_attribute() {
        let facade = plain();
        let dispatcher = DatapointDispatcher::new(table(), [facade.clone() as Arc<dyn ClusterFacade>]).unwrap();

        let outcome = dispatcher.dispatch(1, DpValue::Value(42));
        assert!(outcome.is_updated());
        assert_eq!(facade.read_attribute(0x0001), Some(AttributeValue::U8(42)));
        assert_eq!(facade.read_attribute(0x0002), None);
    }

    #[test]
    fn test_unknown_datapoint_ignored() {
        let facade = plain();
        let dispatcher = DatapointDispatcher::new(table(), [facade.clone() as Arc<dyn ClusterFacade>]).unwrap();

        assert!(matches!(
            dispatcher.dispatch(99, DpValue::Value(1)),
            DispatchOutcome::Ignored(99)
        ));
        assert_eq!(facade.version(), 0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let facade = plain();
        let dispatcher = DatapointDispatcher::new(table(), [facade.clone() as Arc<dyn ClusterFacade>]).unwrap();

        assert!(matches!(
            dispatcher.dispatch(1, DpValue::Value(256)),
            DispatchOutcome::Rejected(QuirkError::OutOfRange { .. })
        ));
        assert!(matches!(
            dispatcher.dispatch(2, DpValue::Value(1)),
            DispatchOutcome::Rejected(QuirkError::TypeMismatch { .. })
        ));
        assert_eq!(facade.version(), 0);
    }

    #[test]
    fn test_dangling_mapping_rejected_at_build() {
        let facade = plain();
        let table = DpMappingTable::new(&[(1, DpToAttributeMapping::new("elsewhere", "level"))]).unwrap();
        assert!(matches!(
            DatapointDispatcher::new(table, [facade.clone() as Arc<dyn ClusterFacade>]),
            Err(QuirkError::UnknownFacade("elsewhere"))
        ));

        let table = DpMappingTable::new(&[(1, DpToAttributeMapping::new("plain", "missing"))]).unwrap();
        assert!(matches!(
            DatapointDispatcher::new(table, [facade as Arc<dyn ClusterFacade>]),
            Err(QuirkError::UnknownAttribute { .. })
        ));
    }
}
