//! MQTT session management.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::MqttConfig;

/// Capacity of the client's outbound request queue.
const REQUEST_QUEUE_CAPACITY: usize = 64;

/// Connect to the MQTT broker.
///
/// Returns the shared client handle and the event-loop driver task. The
/// driver must keep polling for the connection to make progress; it logs
/// each established connection and polls on through errors, which is what
/// re-establishes the connection after a transient loss.
pub fn connect(config: &MqttConfig) -> (AsyncClient, JoinHandle<()>) {
    let mut options = MqttOptions::new(
        config.client_id.clone(),
        config.host.clone(),
        config.port,
    );
    options.set_credentials(config.username.clone(), config.password.clone());
    options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
    options.set_clean_session(true);

    info!("Connecting to MQTT broker at {}:{}", config.host, config.port);

    let (client, mut eventloop) = AsyncClient::new(options, REQUEST_QUEUE_CAPACITY);

    let driver = tokio::spawn(async move {
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("Connected to MQTT broker");
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("MQTT connection error: {}", e);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    });

    (client, driver)
}
