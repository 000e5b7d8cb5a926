//! Sensor fleet data model.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of measurement a simulated sensor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Temperature,
    Humidity,
    Pressure,
    Vibration,
}

impl MeasurementKind {
    /// Get the string representation used in topic names.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::Humidity => "humidity",
            MeasurementKind::Pressure => "pressure",
            MeasurementKind::Vibration => "vibration",
        }
    }

    /// Inclusive `(min, max)` band readings are drawn from.
    pub fn range(&self) -> (f64, f64) {
        match self {
            MeasurementKind::Temperature => (20.0, 40.0),
            MeasurementKind::Humidity => (30.0, 80.0),
            MeasurementKind::Pressure => (950.0, 1050.0),
            MeasurementKind::Vibration => (0.0, 10.0),
        }
    }

    /// Draw one reading uniformly from the band, rounded to two decimal places.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        let (min, max) = self.range();
        let value = rng.gen_range(min..=max);
        (value * 100.0).round() / 100.0
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single simulated sensor: identity plus publish schedule.
///
/// The set of sensors is fixed for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSpec {
    /// Location the sensor belongs to (e.g. "workshop1").
    pub location: String,

    /// Sensor name within the location (e.g. "sensor1").
    pub name: String,

    /// What the sensor measures.
    pub kind: MeasurementKind,

    /// Seconds between publishes. Must be > 0.
    pub interval_secs: u64,
}

impl SensorSpec {
    pub fn new(
        location: impl Into<String>,
        name: impl Into<String>,
        kind: MeasurementKind,
        interval_secs: u64,
    ) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            kind,
            interval_secs,
        }
    }

    /// Build the topic this sensor publishes under.
    pub fn topic(&self) -> String {
        format!("{}/{}/{}", self.location, self.name, self.kind.as_str())
    }

    /// Publish interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// The compiled-in fleet: two workshops with four sensors each.
pub fn default_topology() -> Vec<SensorSpec> {
    vec![
        SensorSpec::new("workshop1", "sensor1", MeasurementKind::Temperature, 2),
        SensorSpec::new("workshop1", "sensor2", MeasurementKind::Humidity, 5),
        SensorSpec::new("workshop1", "sensor3", MeasurementKind::Pressure, 7),
        SensorSpec::new("workshop1", "sensor4", MeasurementKind::Vibration, 10),
        SensorSpec::new("workshop2", "sensor1", MeasurementKind::Temperature, 3),
        SensorSpec::new("workshop2", "sensor2", MeasurementKind::Humidity, 6),
        SensorSpec::new("workshop2", "sensor3", MeasurementKind::Pressure, 8),
        SensorSpec::new("workshop2", "sensor4", MeasurementKind::Vibration, 9),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(MeasurementKind::Temperature.as_str(), "temperature");
        assert_eq!(MeasurementKind::Humidity.as_str(), "humidity");
        assert_eq!(MeasurementKind::Pressure.as_str(), "pressure");
        assert_eq!(MeasurementKind::Vibration.as_str(), "vibration");
    }

    #[test]
    fn test_kind_ranges() {
        assert_eq!(MeasurementKind::Temperature.range(), (20.0, 40.0));
        assert_eq!(MeasurementKind::Humidity.range(), (30.0, 80.0));
        assert_eq!(MeasurementKind::Pressure.range(), (950.0, 1050.0));
        assert_eq!(MeasurementKind::Vibration.range(), (0.0, 10.0));
    }

    #[test]
    fn test_sample_within_range() {
        let mut rng = rand::thread_rng();
        let kinds = [
            MeasurementKind::Temperature,
            MeasurementKind::Humidity,
            MeasurementKind::Pressure,
            MeasurementKind::Vibration,
        ];

        for kind in kinds {
            let (min, max) = kind.range();
            for _ in 0..1000 {
                let value = kind.sample(&mut rng);
                assert!(value >= min && value <= max, "{} out of range for {}", value, kind);
            }
        }
    }

    #[test]
    fn test_sample_rounded_to_two_decimals() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let value = MeasurementKind::Pressure.sample(&mut rng);
            let rescaled = value * 100.0;
            assert!(
                (rescaled - rescaled.round()).abs() < 1e-9,
                "{} not rounded to two decimals",
                value
            );
        }
    }

    #[test]
    fn test_topic_format() {
        let spec = SensorSpec::new("workshop1", "sensor1", MeasurementKind::Temperature, 2);
        assert_eq!(spec.topic(), "workshop1/sensor1/temperature");

        let spec = SensorSpec::new("workshop2", "sensor4", MeasurementKind::Vibration, 9);
        assert_eq!(spec.topic(), "workshop2/sensor4/vibration");
    }

    #[test]
    fn test_interval() {
        let spec = SensorSpec::new("workshop1", "sensor1", MeasurementKind::Temperature, 2);
        assert_eq!(spec.interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_default_topology_shape() {
        let sensors = default_topology();
        assert_eq!(sensors.len(), 8);

        let locations: std::collections::BTreeSet<_> =
            sensors.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(locations.len(), 2);

        for location in &locations {
            let kinds: std::collections::BTreeSet<_> = sensors
                .iter()
                .filter(|s| s.location == *location)
                .map(|s| s.kind.as_str())
                .collect();
            assert_eq!(kinds.len(), 4, "each location has all four kinds");

            let intervals: std::collections::BTreeSet<_> = sensors
                .iter()
                .filter(|s| s.location == *location)
                .map(|s| s.interval_secs)
                .collect();
            assert_eq!(intervals.len(), 4, "intervals are distinct per location");
        }

        for sensor in &sensors {
            assert!((2..=10).contains(&sensor.interval_secs));
        }
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let kind: MeasurementKind = json5::from_str("\"temperature\"").unwrap();
        assert_eq!(kind, MeasurementKind::Temperature);
    }
}
