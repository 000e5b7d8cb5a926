//! Configuration for the simulator.
//!
//! Resolution order: built-in defaults, then the optional JSON5 config
//! file, then environment overrides for the broker settings. The result is
//! an immutable [`SimConfig`] handed to the fleet at startup; nothing reads
//! the environment after that.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::sensor::{SensorSpec, default_topology};

/// Environment variables overriding the broker settings.
pub const ENV_HOST: &str = "MQTT_HOST";
pub const ENV_PORT: &str = "MQTT_PORT";
pub const ENV_USERNAME: &str = "MQTT_USERNAME";
pub const ENV_PASSWORD: &str = "MQTT_PASSWORD";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// MQTT connection settings.
    #[serde(default)]
    pub mqtt: MqttConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Sensor fleet. Compiled in, not read from the config file.
    #[serde(skip, default = "default_topology")]
    pub sensors: Vec<SensorSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mqtt: MqttConfig::default(),
            logging: LoggingConfig::default(),
            sensors: default_topology(),
        }
    }
}

/// MQTT broker connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Broker network address (default: "mqtt-broker").
    #[serde(default = "default_host")]
    pub host: String,

    /// Broker TCP port (default: 1883).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Username presented to the broker.
    #[serde(default = "default_username")]
    pub username: String,

    /// Password presented to the broker.
    #[serde(default = "default_password")]
    pub password: String,

    /// Client identifier (default: "sensor-sim").
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Keep-alive interval in seconds (default: 30).
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,
}

fn default_host() -> String {
    "mqtt-broker".to_string()
}

fn default_port() -> u16 {
    1883
}

fn default_username() -> String {
    "your_mqtt_user".to_string()
}

fn default_password() -> String {
    "your_password".to_string()
}

fn default_client_id() -> String {
    "sensor-sim".to_string()
}

fn default_keep_alive() -> u64 {
    30
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            client_id: default_client_id(),
            keep_alive_secs: default_keep_alive(),
        }
    }
}

impl MqttConfig {
    /// Apply broker overrides using the given variable lookup.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.parse().map_err(|_| {
                ConfigError::Validation(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        Ok(())
    }

    /// Apply broker overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SimConfig {
    /// Resolve the configuration: defaults, optional JSON5 file, then
    /// environment overrides. Validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.mqtt.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SimConfig = json5::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.host.is_empty() {
            return Err(ConfigError::Validation("mqtt.host must not be empty".to_string()));
        }
        if self.mqtt.port == 0 {
            return Err(ConfigError::Validation("mqtt.port must be > 0".to_string()));
        }
        // rumqttc rejects keep-alives under 5 seconds
        if self.mqtt.keep_alive_secs < 5 {
            return Err(ConfigError::Validation(
                "mqtt.keep_alive_secs must be >= 5".to_string(),
            ));
        }

        if self.sensors.is_empty() {
            return Err(ConfigError::Validation(
                "At least one sensor must be configured".to_string(),
            ));
        }
        for sensor in &self.sensors {
            if sensor.location.is_empty() || sensor.name.is_empty() {
                return Err(ConfigError::Validation(
                    "Sensor location and name must not be empty".to_string(),
                ));
            }
            if sensor.interval_secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "Sensor '{}/{}': interval_secs must be > 0",
                    sensor.location, sensor.name
                )));
            }
        }

        Ok(())
    }
}
