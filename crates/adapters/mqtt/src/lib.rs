//! # tinyhouse-adapter-mqtt
//!
//! MQTT adapter — connects the light sync core to a broker.
//!
//! ## Responsibilities
//! - Connect to the broker (keep-alive, optional credentials)
//! - Subscribe to the inbound topic at exactly-once QoS, on every connection
//! - Hand inbound payloads to a [`MessageHandler`](tinyhouse_app::ports::MessageHandler)
//! - Publish announcements through the [`Transport`](tinyhouse_app::ports::Transport) port
//!
//! Publishing only queues the request for the event loop: a broker that
//! refuses a message later is not reported back to the caller.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `tinyhouse-app` and `tinyhouse-domain`.

mod config;
mod error;
mod event_loop;
mod transport;

pub use config::MqttConfig;
pub use error::MqttError;
pub use event_loop::MqttEventLoop;
pub use transport::MqttTransport;

use rumqttc::{AsyncClient, MqttOptions};

/// Capacity of the request queue between clients and the event loop.
const REQUEST_CAPACITY: usize = 64;

/// Create the publishing and inbound halves of a broker connection.
///
/// Nothing touches the network until [`MqttEventLoop::run`] is polled.
#[must_use]
pub fn connect(config: &MqttConfig) -> (MqttTransport, MqttEventLoop) {
    let mut options = MqttOptions::new(&config.client_id, &config.broker_host, config.broker_port);
    options.set_keep_alive(config.keep_alive());
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        options.set_credentials(username, password);
    }

    let (client, event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);
    tracing::debug!(
        host = %config.broker_host,
        port = config.broker_port,
        client_id = %config.client_id,
        "MQTT client created"
    );

    let transport = MqttTransport::new(client);
    (
        transport.clone(),
        MqttEventLoop::new(
            transport,
            event_loop,
            config.inbound_topic.clone(),
            config.reconnect_delay(),
        ),
    )
}
