//! Events exchanged between cluster facades of one device.

use strum::{Display, EnumDiscriminants};

/// A derived reading one facade announces to its siblings.
///
/// The generated [`EventKind`] discriminant keys the bus registry, so
/// listeners subscribe to a tag and receive the full typed payload.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(EventKind), derive(Hash, Display))]
pub enum DeviceEvent {
    /// Raw, uncalibrated light intensity as reported by the device.
    IlluminanceReported(u32),
}

impl DeviceEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind() {
        let event = DeviceEvent::IlluminanceReported(50);
        assert_eq!(event.kind(), EventKind::IlluminanceReported);
        assert_eq!(event.kind().to_string(), "IlluminanceReported");
    }
}
