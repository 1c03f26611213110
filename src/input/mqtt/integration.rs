//! MQTT integration orchestrator.
//!
//! Routes datapoint reports published on `<prefix>/<device>/datapoint` to the
//! matching quirk instance. Malformed payloads are logged and dropped.

use super::client::{MqttClient, MqttMessage};
use crate::config::MqttConfig;
use crate::device::Quirk;
use crate::error::Result;
use crate::tuya::{DispatchOutcome, DpReport};
use log::{debug, info, warn};
use rumqttc::QoS;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// A device fed from one MQTT topic.
struct DatapointDevice {
    name: String,
    topic: String,
    quirk: Arc<dyn Quirk>,
}

impl DatapointDevice {
    /// Process a message and update the device if applicable.
    /// Returns true if the message was for this device.
    fn process_message(&self, topic: &str, payload: &str) -> bool {
        if topic != self.topic {
            return false;
        }

        match self.handle_payload(payload) {
            Ok(DispatchOutcome::Updated {
                ep_attribute,
                attribute,
                value,
            }) => {
                info!(
                    "[MQTT] {} {}.{} updated: {:?}",
                    self.name, ep_attribute, attribute, value
                );
            }
            Ok(DispatchOutcome::Ignored(dp)) => {
                debug!("[MQTT] {} ignored datapoint {}", self.name, dp);
            }
            Ok(DispatchOutcome::Rejected(e)) => {
                warn!("[MQTT] {} rejected report: {}", self.name, e);
            }
            Err(e) => {
                warn!("[MQTT] Failed to parse {} report: {}", self.name, e);
            }
        }
        true
    }

    fn handle_payload(&self, payload: &str) -> Result<DispatchOutcome> {
        let report: DpReport = serde_json::from_str(payload)?;
        let value = report.decode()?;
        Ok(self.quirk.report(report.dp, value))
    }
}

/// MQTT integration orchestrator.
///
/// Manages the MQTT client and device subscriptions, keeping MQTT internals
/// out of main.rs.
pub struct MqttIntegration {
    config: MqttConfig,
    devices: Vec<DatapointDevice>,
}

impl MqttIntegration {
    /// Create a new MQTT integration with the given broker config.
    pub fn new(config: MqttConfig) -> Self {
        Self {
            config,
            devices: Vec::new(),
        }
    }

    /// Add a device whose reports arrive under `name`.
    pub fn with_device(mut self, name: impl Into<String>, quirk: Arc<dyn Quirk>) -> Self {
        let name = name.into();
        let topic = self.config.datapoint_topic(&name);
        self.devices.push(DatapointDevice { name, topic, quirk });
        self
    }

    /// Start the MQTT integration.
    ///
    /// Spawns a background task that connects to the broker, subscribes to
    /// device topics, and routes messages to the appropriate devices.
    /// Returns a JoinHandle that can be used to abort the task on shutdown.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Route one message. Returns true if a device handled it.
    fn route(&self, msg: &MqttMessage) -> bool {
        self.devices
            .iter()
            .any(|device| device.process_message(&msg.topic, &msg.payload))
    }

    async fn run(self) {
        if self.devices.is_empty() {
            info!("[MQTT] No devices configured, skipping MQTT integration");
            return;
        }

        info!(
            "[MQTT] Connecting to {}:{}",
            self.config.broker_host, self.config.broker_port
        );

        let mqtt_client = MqttClient::new(&self.config);
        let subscribe_client = mqtt_client.client();

        let (msg_tx, mut msg_rx) = mpsc::channel::<MqttMessage>(64);
        let (connected_tx, connected_rx) = oneshot::channel();

        // Start MQTT event loop FIRST (so it can establish connection)
        let mqtt_loop = tokio::spawn(async move {
            mqtt_client.run(msg_tx, Some(connected_tx)).await;
        });

        match tokio::time::timeout(Duration::from_secs(10), connected_rx).await {
            Ok(Ok(())) => {
                info!("[MQTT] Connection established, subscribing to topics");
            }
            Ok(Err(_)) => {
                warn!("[MQTT] Connection signal channel dropped");
                return;
            }
            Err(_) => {
                warn!("[MQTT] Connection timeout after 10 seconds");
                mqtt_loop.abort();
                return;
            }
        }

        for device in &self.devices {
            if let Err(e) = subscribe_client
                .subscribe(&device.topic, QoS::AtMostOnce)
                .await
            {
                warn!("[MQTT] Failed to subscribe to {}: {:?}", device.topic, e);
            }
        }

        info!(
            "[MQTT] Integration started with {} device(s)",
            self.devices.len()
        );

        while let Some(msg) = msg_rx.recv().await {
            if !self.route(&msg) {
                debug!("[MQTT] No device for topic {}", msg.topic);
            }
        }

        mqtt_loop.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::device::TuyaSolarRainSensor;

    fn integration() -> (MqttIntegration, Arc<TuyaSolarRainSensor>) {
        let device = Arc::new(TuyaSolarRainSensor::new().unwrap());
        let integration =
            MqttIntegration::new(Config::default().mqtt).with_device("garden", device.clone());
        (integration, device)
    }

    fn message(topic: &str, payload: &str) -> MqttMessage {
        MqttMessage {
            topic: topic.to_string(),
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_routes_report_to_device() {
        let (integration, device) = integration();

        let handled = integration.route(&message(
            "tuya/garden/datapoint",
            r#"{"dp": 101, "type": "value", "value": 50}"#,
        ));

        assert!(handled);
        assert_eq!(device.manufacturer_cluster().light_intensity(), Some(50));
        assert_eq!(device.illuminance_cluster().measured_value(), Some(350));
    }

    #[test]
    fn test_other_topics_are_not_handled() {
        let (integration, device) = integration();

        let handled = integration.route(&message(
            "tuya/porch/datapoint",
            r#"{"dp": 101, "type": "value", "value": 50}"#,
        ));

        assert!(!handled);
        assert_eq!(device.manufacturer_cluster().light_intensity(), None);
    }

    #[test]
    fn test_malformed_payload_is_dropped() {
        let (integration, device) = integration();

        assert!(integration.route(&message("tuya/garden/datapoint", "not json")));
        assert!(integration.route(&message(
            "tuya/garden/datapoint",
            r#"{"dp": 104, "type": "bool", "value": 1}"#,
        )));

        assert_eq!(device.manufacturer_cluster().cleaning_reminder(), None);
    }
}
