use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from .env file with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (key, value) in parse_dotenv(&content) {
        // Only set if not already set (env vars take precedence)
        if std::env::var(key).is_err() {
            // SAFETY: We're single-threaded at this point (called before any async runtime)
            unsafe { std::env::set_var(key, value) };
        }
    }
}

/// Parse `KEY=value` lines, skipping blanks and comments.
fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Find the first '=' and split there
        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            // Remove surrounding quotes if present
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }

            pairs.push((key, value));
        }
    }

    pairs
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub mqtt: MqttConfig,
    pub device: DeviceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub client_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Datapoint reports are read from `<topic_prefix>/<device name>/datapoint`
    pub topic_prefix: String,
}

/// The physical device this bridge instance serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Friendly name used in MQTT topics
    pub name: String,
    /// Manufacturer string from the Basic cluster (selects the quirk)
    pub manufacturer: String,
    /// Model identifier from the Basic cluster (selects the quirk)
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mqtt: MqttConfig {
                broker_host: "10.0.0.2".to_string(),
                broker_port: 1883,
                client_id: "tuya-dp-bridge".to_string(),
                username: None,
                password: None,
                topic_prefix: "tuya".to_string(),
            },
            device: DeviceConfig {
                name: "rain-sensor".to_string(),
                manufacturer: "_TZ3210_tgvtvdoc".to_string(),
                model: "TS0207".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // MQTT configuration
        if let Ok(host) = std::env::var("MQTT_BROKER_HOST") {
            config.mqtt.broker_host = host;
        }
        if let Ok(port) = std::env::var("MQTT_BROKER_PORT")
            && let Ok(p) = port.parse()
        {
            config.mqtt.broker_port = p;
        }
        if let Ok(client_id) = std::env::var("MQTT_CLIENT_ID") {
            config.mqtt.client_id = client_id;
        }
        if let Ok(username) = std::env::var("MQTT_USERNAME") {
            config.mqtt.username = Some(username);
        }
        if let Ok(password) = std::env::var("MQTT_PASSWORD") {
            config.mqtt.password = Some(password);
        }
        if let Ok(prefix) = std::env::var("MQTT_TOPIC_PREFIX") {
            config.mqtt.topic_prefix = prefix;
        }

        // Device configuration
        if let Ok(name) = std::env::var("DEVICE_NAME") {
            config.device.name = name;
        }
        if let Ok(manufacturer) = std::env::var("DEVICE_MANUFACTURER") {
            config.device.manufacturer = manufacturer;
        }
        if let Ok(model) = std::env::var("DEVICE_MODEL") {
            config.device.model = model;
        }

        config
    }
}

impl MqttConfig {
    /// Topic carrying datapoint reports for a device.
    pub fn datapoint_topic(&self, device_name: &str) -> String {
        format!("{}/{}/datapoint", self.topic_prefix, device_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotenv() {
        let content = "# comment\n\nMQTT_BROKER_HOST = 192.168.1.5\nDEVICE_NAME=\"Garden Rain\"\nMQTT_TOPIC_PREFIX='tuya'\nnot a pair\n";
        let pairs = parse_dotenv(content);
        assert_eq!(
            pairs,
            vec![
                ("MQTT_BROKER_HOST", "192.168.1.5"),
                ("DEVICE_NAME", "Garden Rain"),
                ("MQTT_TOPIC_PREFIX", "tuya"),
            ]
        );
    }

    #[test]
    fn test_defaults_select_ts0207() {
        let config = Config::default();
        assert_eq!(config.device.model, "TS0207");
        assert_eq!(
            config.mqtt.datapoint_topic(&config.device.name),
            "tuya/rain-sensor/datapoint"
        );
    }
}
