//! Inbound half of the MQTT connection.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{ConnectionError, Event, EventLoop, Outgoing, Packet};
use tinyhouse_app::ports::{MessageHandler, QoS, Transport};

use crate::error::MqttError;
use crate::transport::MqttTransport;

/// Drives the rumqttc event loop and feeds inbound publishes to a
/// [`MessageHandler`].
pub struct MqttEventLoop {
    transport: MqttTransport,
    event_loop: EventLoop,
    inbound_topic: String,
    reconnect_delay: Duration,
}

/// Whether the loop keeps polling after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

impl MqttEventLoop {
    pub(crate) fn new(
        transport: MqttTransport,
        event_loop: EventLoop,
        inbound_topic: String,
        reconnect_delay: Duration,
    ) -> Self {
        Self {
            transport,
            event_loop,
            inbound_topic,
            reconnect_delay,
        }
    }

    /// Poll the connection until the client disconnects.
    ///
    /// The inbound topic is (re)subscribed at exactly-once QoS on every
    /// connection acknowledgement, so subscriptions survive reconnects.
    /// Connection errors are logged and retried after the reconnect delay.
    /// Returns once the `Disconnect` requested through
    /// [`MqttTransport::disconnect`] has been sent, or once every client
    /// handle is gone.
    pub async fn run<H>(mut self, handler: Arc<H>)
    where
        H: MessageHandler + ?Sized,
    {
        tracing::info!(topic = %self.inbound_topic, "MQTT event loop started");
        loop {
            match self.event_loop.poll().await {
                Ok(event) => {
                    let flow =
                        dispatch(event, &self.inbound_topic, &self.transport, handler.as_ref()).await;
                    if flow == Flow::Stop {
                        return;
                    }
                }
                Err(ConnectionError::RequestsDone) => {
                    tracing::info!("MQTT clients gone, event loop stopped");
                    return;
                }
                Err(err) => {
                    tracing::warn!(
                        err = %MqttError::Connection(err),
                        delay_secs = self.reconnect_delay.as_secs(),
                        "MQTT connection lost, retrying"
                    );
                    tokio::time::sleep(self.reconnect_delay).await;
                }
            }
        }
    }
}

async fn dispatch<T, H>(event: Event, inbound_topic: &str, transport: &T, handler: &H) -> Flow
where
    T: Transport,
    H: MessageHandler + ?Sized,
{
    match event {
        Event::Incoming(Packet::ConnAck(_)) => {
            tracing::info!("connected to MQTT broker");
            if let Err(err) = transport.subscribe(inbound_topic, QoS::ExactlyOnce).await {
                tracing::warn!(%err, topic = %inbound_topic, "failed to subscribe to inbound topic");
            }
            Flow::Continue
        }
        Event::Incoming(Packet::Publish(publish)) => {
            if is_inbound(inbound_topic, &publish.topic) {
                handler.on_message(&publish.topic, &publish.payload);
            } else {
                tracing::trace!(topic = %publish.topic, "message on foreign topic ignored");
            }
            Flow::Continue
        }
        Event::Outgoing(Outgoing::Disconnect) => {
            tracing::info!("disconnected from MQTT broker");
            Flow::Stop
        }
        _ => Flow::Continue,
    }
}

fn is_inbound(inbound_topic: &str, topic: &str) -> bool {
    inbound_topic == topic
}
