//! Development tool for injecting datapoint reports.
//!
//! Publishes one report to the topic the bridge listens on, so the
//! datapoint path can be exercised without the physical sensor.
//!
//! Usage:
//!   cargo run --bin dp-report -- 101 value 50
//!   cargo run --bin dp-report -- --device garden 104 bool true

use clap::Parser;
use log::{error, info};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tuya_dp_bridge::config::{self, Config};
use tuya_dp_bridge::input::mqtt::MqttClient;
use tuya_dp_bridge::tuya::{DpReport, DpType};

#[derive(Parser)]
#[command(name = "dp-report")]
#[command(about = "Publish a Tuya datapoint report to the bridge's MQTT topic")]
struct Cli {
    /// Device friendly name (topic segment)
    #[arg(long, env = "DEVICE_NAME")]
    device: Option<String>,

    /// Datapoint id
    dp: u8,

    /// Datapoint type: raw, bool, value, string, enum, bitmap
    dp_type: DpType,

    /// Value; JSON for everything but strings (e.g. `50`, `true`, `[1,2]`)
    value: String,
}

fn build_report(cli: &Cli) -> Result<DpReport, Box<dyn std::error::Error>> {
    let value = match cli.dp_type {
        DpType::String => serde_json::Value::String(cli.value.clone()),
        _ => serde_json::from_str(&cli.value)?,
    };
    let report = DpReport {
        dp: cli.dp,
        dp_type: cli.dp_type,
        value,
    };
    // Reject reports the bridge would drop
    report.decode()?;
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let device = cli.device.clone().unwrap_or(config.device.name.clone());
    let topic = config.mqtt.datapoint_topic(&device);

    let report = build_report(&cli)?;
    let payload = serde_json::to_string(&report)?;

    info!(
        "Connecting to MQTT broker at {}:{}",
        config.mqtt.broker_host, config.mqtt.broker_port
    );
    let mqtt_client = MqttClient::new(&config.mqtt);
    let client = mqtt_client.client();

    let (msg_tx, _msg_rx) = mpsc::channel(1);
    let (connected_tx, connected_rx) = oneshot::channel();
    let mqtt_handle = tokio::spawn(async move {
        mqtt_client.run(msg_tx, Some(connected_tx)).await;
    });

    if tokio::time::timeout(Duration::from_secs(10), connected_rx)
        .await
        .is_err()
    {
        error!("Connection timeout after 10 seconds");
        mqtt_handle.abort();
        return Err("MQTT connection timeout".into());
    }

    client
        .publish(&topic, rumqttc::QoS::AtLeastOnce, false, payload.as_bytes())
        .await?;
    info!("Published to {}: {}", topic, payload);

    // Let the event loop flush the publish before exiting
    tokio::time::sleep(Duration::from_millis(500)).await;
    mqtt_handle.abort();
    Ok(())
}
