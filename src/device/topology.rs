//! Static device topology declarations.
//!
//! A signature describes what the physical device announces when it joins;
//! a replacement describes what the host should expose instead. Both are
//! plain data consumed at device-binding time.

/// Manufacturer/model pair reported by the Basic cluster.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModelInfo {
    pub manufacturer: &'static str,
    pub model: &'static str,
}

impl ModelInfo {
    pub const fn new(manufacturer: &'static str, model: &'static str) -> Self {
        Self {
            manufacturer,
            model,
        }
    }
}

/// A cluster slot on an endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClusterRef {
    /// Host's stock implementation of this cluster ID
    Standard(u16),
    /// Quirk-provided implementation, identified by its endpoint attribute name
    Custom {
        cluster_id: u16,
        ep_attribute: &'static str,
        /// Whether the host should bind this cluster during configuration
        bind: bool,
    },
}

impl ClusterRef {
    pub const fn custom(cluster_id: u16, ep_attribute: &'static str) -> Self {
        ClusterRef::Custom {
            cluster_id,
            ep_attribute,
            bind: true,
        }
    }

    pub const fn custom_no_bind(cluster_id: u16, ep_attribute: &'static str) -> Self {
        ClusterRef::Custom {
            cluster_id,
            ep_attribute,
            bind: false,
        }
    }

    pub fn cluster_id(&self) -> u16 {
        match *self {
            ClusterRef::Standard(id) => id,
            ClusterRef::Custom { cluster_id, .. } => cluster_id,
        }
    }
}

/// One logical endpoint of a device.
#[derive(Clone, Copy, Debug)]
pub struct EndpointDescriptor {
    pub endpoint_id: u8,
    pub profile_id: u16,
    pub device_type: u16,
    pub input_clusters: &'static [ClusterRef],
    pub output_clusters: &'static [ClusterRef],
}

impl EndpointDescriptor {
    pub fn has_input_cluster(&self, cluster_id: u16) -> bool {
        self.input_clusters
            .iter()
            .any(|c| c.cluster_id() == cluster_id)
    }
}

/// What a physical device must look like for a quirk to apply.
#[derive(Clone, Copy, Debug)]
pub struct DeviceSignature {
    pub models_info: &'static [ModelInfo],
    pub endpoints: &'static [EndpointDescriptor],
}

impl DeviceSignature {
    /// Whether the reported manufacturer/model pair selects this quirk.
    pub fn matches_model(&self, manufacturer: &str, model: &str) -> bool {
        self.models_info
            .iter()
            .any(|m| m.manufacturer == manufacturer && m.model == model)
    }

    pub fn endpoint(&self, endpoint_id: u8) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|e| e.endpoint_id == endpoint_id)
    }
}

/// Endpoints the host exposes in place of the raw signature.
#[derive(Clone, Copy, Debug)]
pub struct DeviceReplacement {
    pub endpoints: &'static [EndpointDescriptor],
}

impl DeviceReplacement {
    pub fn endpoint(&self, endpoint_id: u8) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|e| e.endpoint_id == endpoint_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENDPOINTS: &[EndpointDescriptor] = &[EndpointDescriptor {
        endpoint_id: 1,
        profile_id: 0x0104,
        device_type: 0x0402,
        input_clusters: &[ClusterRef::Standard(0x0000), ClusterRef::custom(0xEF00, "tuya")],
        output_clusters: &[ClusterRef::Standard(0x000A)],
    }];

    static SIGNATURE: DeviceSignature = DeviceSignature {
        models_info: &[ModelInfo::new("_TZ3210_tgvtvdoc", "TS0207")],
        endpoints: ENDPOINTS,
    };

    #[test]
    fn test_matches_model() {
        assert!(SIGNATURE.matches_model("_TZ3210_tgvtvdoc", "TS0207"));
        assert!(!SIGNATURE.matches_model("_TZ3210_tgvtvdoc", "TS0601"));
        assert!(!SIGNATURE.matches_model("_TZ3000_other", "TS0207"));
    }

    #[test]
    fn test_endpoint_lookup() {
        let ep = SIGNATURE.endpoint(1).unwrap();
        assert!(ep.has_input_cluster(0xEF00));
        assert!(!ep.has_input_cluster(0x0006));
        assert!(SIGNATURE.endpoint(2).is_none());
    }
}
