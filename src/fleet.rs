//! Per-sensor publish loops.

use rumqttc::{AsyncClient, QoS};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::sensor::SensorSpec;

/// Format a reading for the wire: the value with exactly two fractional
/// digits, e.g. `"23.70"`.
pub fn payload(value: f64) -> String {
    format!("{:.2}", value)
}

/// The publish loop for a single sensor.
///
/// Each sensor runs one of these as an independent task on its own clock;
/// tasks never synchronize with each other.
pub struct SensorPublisher {
    spec: SensorSpec,
    client: AsyncClient,
}

impl SensorPublisher {
    pub fn new(spec: SensorSpec, client: AsyncClient) -> Self {
        Self { spec, client }
    }

    /// Run the publish loop. Never returns; the task is aborted at
    /// process shutdown.
    pub async fn run(self) {
        let topic = self.spec.topic();
        let interval = self.spec.interval();

        info!(
            "Starting sensor '{}' (interval: {}s)",
            topic, self.spec.interval_secs
        );

        loop {
            let value = self.spec.kind.sample(&mut rand::thread_rng());
            let payload = payload(value);

            match self
                .client
                .publish(topic.clone(), QoS::AtMostOnce, false, payload.clone())
                .await
            {
                Ok(()) => info!("Published: {} = {}", topic, payload),
                Err(e) => warn!("Failed to publish to '{}': {}", topic, e),
            }

            tokio::time::sleep(interval).await;
        }
    }
}

/// Spawn one publish task per sensor on the shared client.
pub fn spawn_fleet(sensors: Vec<SensorSpec>, client: &AsyncClient) -> Vec<JoinHandle<()>> {
    sensors
        .into_iter()
        .map(|spec| {
            let publisher = SensorPublisher::new(spec, client.clone());
            tokio::spawn(publisher.run())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::MeasurementKind;

    #[test]
    fn test_payload_two_fractional_digits() {
        assert_eq!(payload(20.0), "20.00");
        assert_eq!(payload(23.7), "23.70");
        assert_eq!(payload(1013.25), "1013.25");
        assert_eq!(payload(0.0), "0.00");
    }

    #[test]
    fn test_payload_of_sampled_values() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let value = MeasurementKind::Humidity.sample(&mut rng);
            let text = payload(value);
            let fraction = text.split('.').nth(1).unwrap();
            assert_eq!(fraction.len(), 2, "payload '{}' not two digits", text);
            // The payload parses back to the sampled value
            assert_eq!(text.parse::<f64>().unwrap(), value);
        }
    }
}
