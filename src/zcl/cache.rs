//! Per-cluster attribute storage.
//!
//! Each cluster facade owns one `AttributeCache`. Values are only written
//! through [`AttributeCache::update`], which enforces the declared type and
//! access of the attribute. A version counter lets the host detect changes
//! without diffing values.

use super::{Access, AttributeDef, AttributeValue};
use crate::error::{QuirkError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct AttributeCache {
    cluster: &'static str,
    defs: &'static [AttributeDef],
    values: RwLock<HashMap<u16, AttributeValue>>,
    version: AtomicU32,
}

impl AttributeCache {
    /// Create an empty cache for the given attribute declarations.
    pub fn new(cluster: &'static str, defs: &'static [AttributeDef]) -> Self {
        Self {
            cluster,
            defs,
            values: RwLock::new(HashMap::new()),
            version: AtomicU32::new(0),
        }
    }

    /// Create a cache with constant attributes already populated.
    ///
    /// Constants bypass the access check; they are the only way a
    /// [`Access::Constant`] attribute ever gets a value.
    pub fn with_constants(
        cluster: &'static str,
        defs: &'static [AttributeDef],
        constants: &[(u16, AttributeValue)],
    ) -> Self {
        let cache = Self::new(cluster, defs);
        cache.values.write().extend(constants.iter().copied());
        cache
    }

    pub fn cluster(&self) -> &'static str {
        self.cluster
    }

    pub fn defs(&self) -> &'static [AttributeDef] {
        self.defs
    }

    pub fn def(&self, attr_id: u16) -> Option<&'static AttributeDef> {
        self.defs.iter().find(|d| d.id == attr_id)
    }

    pub fn def_by_name(&self, name: &str) -> Option<&'static AttributeDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn get(&self, attr_id: u16) -> Option<AttributeValue> {
        self.values.read().get(&attr_id).copied()
    }

    /// Store a value. Returns whether the stored value changed.
    pub fn update(&self, attr_id: u16, value: AttributeValue) -> Result<bool> {
        let def = self
            .def(attr_id)
            .ok_or_else(|| QuirkError::UnknownAttribute {
                cluster: self.cluster,
                attribute: format!("0x{:04X}", attr_id),
            })?;

        if def.access == Access::Constant {
            return Err(QuirkError::ReadOnlyAttribute(def.name));
        }
        if value.attr_type() != def.attr_type {
            return Err(QuirkError::WrongAttributeType {
                attribute: def.name,
                expected: def.attr_type,
                found: value.attr_type(),
            });
        }

        let old = self.values.write().insert(attr_id, value);
        let changed = old != Some(value);
        if changed {
            self.version.fetch_add(1, Ordering::SeqCst);
        }
        Ok(changed)
    }

    /// Current version, incremented each time a stored value changes.
    pub fn version(&self) -> u32 {
        self.version.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zcl::AttributeType;

    static DEFS: &[AttributeDef] = &[
        AttributeDef::new(0x0000, "measured_value", AttributeType::U16),
        AttributeDef::new(0x0001, "min_measured_value", AttributeType::U16).constant(),
    ];

    #[test]
    fn test_update_increments_version_on_change() {
        let cache = AttributeCache::new("test", DEFS);
        assert_eq!(cache.version(), 0);
        assert_eq!(cache.get(0x0000), None);

        assert!(cache.update(0x0000, AttributeValue::U16(10)).unwrap());
        assert_eq!(cache.get(0x0000), Some(AttributeValue::U16(10)));
        assert_eq!(cache.version(), 1);

        // Same value doesn't bump the version
        assert!(!cache.update(0x0000, AttributeValue::U16(10)).unwrap());
        assert_eq!(cache.version(), 1);
    }

    #[test]
    fn test_update_rejects_wrong_type() {
        let cache = AttributeCache::new("test", DEFS);
        let err = cache.update(0x0000, AttributeValue::Bool(true)).unwrap_err();
        assert!(matches!(err, QuirkError::WrongAttributeType { .. }));
        assert_eq!(cache.get(0x0000), None);
        assert_eq!(cache.version(), 0);
    }

    #[test]
    fn test_constants_are_read_only() {
        let cache = AttributeCache::with_constants("test", DEFS, &[(0x0001, AttributeValue::U16(1))]);
        assert_eq!(cache.get(0x0001), Some(AttributeValue::U16(1)));

        let err = cache.update(0x0001, AttributeValue::U16(5)).unwrap_err();
        assert!(matches!(err, QuirkError::ReadOnlyAttribute("min_measured_value")));
        assert_eq!(cache.get(0x0001), Some(AttributeValue::U16(1)));
    }

    #[test]
    fn test_unknown_attribute() {
        let cache = AttributeCache::new("test", DEFS);
        assert!(matches!(
            cache.update(0x0042, AttributeValue::U16(1)),
            Err(QuirkError::UnknownAttribute { .. })
        ));
        assert!(cache.def_by_name("measured_value").is_some());
        assert!(cache.def_by_name("nope").is_none());
    }
}
