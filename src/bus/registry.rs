//! Per-device publish/subscribe registry.
//!
//! Delivery is synchronous: `publish` returns only after every listener
//! registered for the event's kind has run. A listener that fails or panics
//! is logged and skipped; the remaining listeners still receive the event.

use super::{DeviceEvent, EventKind};
use crate::error::Result;
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Something that reacts to device events.
pub trait BusListener: Send + Sync {
    /// Name used in diagnostics.
    fn listener_name(&self) -> &'static str;

    /// Handle one event. Errors and panics are isolated to this listener.
    fn on_event(&self, event: &DeviceEvent) -> Result<()>;
}

/// Event bus owned by a single device instance.
#[derive(Default)]
pub struct Bus {
    listeners: RwLock<HashMap<EventKind, Vec<Arc<dyn BusListener>>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind.
    ///
    /// Listeners are delivered to in registration order and are never removed.
    pub fn subscribe(&self, kind: EventKind, listener: Arc<dyn BusListener>) {
        debug!("Attaching {} to {} events", listener.listener_name(), kind);
        self.listeners.write().entry(kind).or_default().push(listener);
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.read().get(&kind).map_or(0, Vec::len)
    }

    /// Deliver an event to every current listener of its kind.
    pub fn publish(&self, event: &DeviceEvent) {
        let kind = event.kind();
        // Snapshot so listeners run without the registry lock held
        let listeners = self.listeners.read().get(&kind).cloned().unwrap_or_default();

        if listeners.is_empty() {
            debug!("No listeners for {}", kind);
            return;
        }

        for listener in listeners {
            match catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    "Listener {} failed to handle {:?}: {}",
                    listener.listener_name(),
                    event,
                    e
                ),
                Err(_) => warn!(
                    "Listener {} panicked handling {:?}",
                    listener.listener_name(),
                    event
                ),
            }
        }
    }
}
