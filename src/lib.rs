//! MQTT sensor fleet simulator.
//!
//! Simulates a small fleet of industrial sensors that periodically publish
//! readings to an MQTT broker: one independent publish loop per sensor,
//! all sharing a single connection.
//!
//! # Topics
//!
//! ```text
//! <location>/<sensor>/<kind>
//! workshop1/sensor1/temperature
//! ```
//!
//! Where `<kind>` is `temperature`, `humidity`, `pressure`, or
//! `vibration`. The payload is the reading formatted with two decimal
//! places.

pub mod config;
pub mod fleet;
pub mod mqtt;
pub mod sensor;

pub use config::{LoggingConfig, MqttConfig, SimConfig};
pub use sensor::{MeasurementKind, SensorSpec, default_topology};

use config::ConfigError;

/// Initialize tracing with the given configuration.
///
/// The `RUST_LOG` environment variable takes precedence over the
/// configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| ConfigError::Validation(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
