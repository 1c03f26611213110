use log::{error, info, warn};
use tokio::signal;
use tuya_dp_bridge::config::{self, Config};
use tuya_dp_bridge::device::QuirkRegistry;
use tuya_dp_bridge::input::mqtt::MqttIntegration;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    config::load_dotenv();
    init_logger();
    info!("Starting Tuya datapoint bridge");

    let config = Config::from_env();
    info!("Configuration loaded:");
    info!("  Device: {}", config.device.name);
    info!(
        "  Model: {} / {}",
        config.device.manufacturer, config.device.model
    );
    info!(
        "  Broker: {}:{}",
        config.mqtt.broker_host, config.mqtt.broker_port
    );

    let registry = QuirkRegistry::with_builtin();
    let quirk = match registry.build(&config.device.manufacturer, &config.device.model) {
        Ok(Some(quirk)) => quirk,
        Ok(None) => {
            error!(
                "No quirk matches {} / {}",
                config.device.manufacturer, config.device.model
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to build device: {}", e);
            std::process::exit(1);
        }
    };

    let mqtt_handle = MqttIntegration::new(config.mqtt.clone())
        .with_device(config.device.name.clone(), quirk)
        .start();

    info!(
        "Listening for datapoints on {}",
        config.mqtt.datapoint_topic(&config.device.name)
    );
    info!("  - Press Ctrl+C to exit");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Received shutdown signal");
        }
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
    }

    mqtt_handle.abort();
    info!("Tuya datapoint bridge stopped");
}
