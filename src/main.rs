//! MQTT sensor fleet simulator.
//!
//! Publishes synthetic readings for a fixed fleet of industrial sensors,
//! one independent publish loop per sensor, over a shared MQTT connection.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use mqtt_sensor_sim::config::{LoggingConfig, SimConfig};
use mqtt_sensor_sim::{fleet, init_tracing, mqtt};

/// MQTT sensor fleet simulator.
#[derive(Parser, Debug)]
#[command(name = "mqtt-sensor-sim")]
#[command(about = "Publishes synthetic sensor readings to an MQTT broker")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format). Defaults and
    /// environment variables apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = SimConfig::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to resolve configuration".to_string(),
    })?;

    let log_config = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
    };
    init_tracing(&log_config).context("Failed to initialize tracing")?;

    info!("Starting mqtt-sensor-sim");

    let (client, driver) = mqtt::connect(&config.mqtt);

    let tasks = fleet::spawn_fleet(config.sensors, &client);

    info!(
        "Fleet running with {} sensor(s). Press Ctrl+C to stop.",
        tasks.len()
    );

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    // Sensor tasks are abandoned, not drained
    for task in &tasks {
        task.abort();
    }

    if let Err(e) = client.disconnect().await {
        warn!("Error disconnecting from broker: {}", e);
    }

    // Let the event loop flush the disconnect before tearing it down
    tokio::time::sleep(Duration::from_millis(100)).await;
    driver.abort();

    info!("Simulator stopped");
    Ok(())
}
