//! [`Transport`] implementation over a rumqttc client.

use rumqttc::AsyncClient;
use tinyhouse_app::ports::{QoS, Transport};
use tinyhouse_domain::error::PublishError;

use crate::error::MqttError;

/// Publishing half of the MQTT connection. Cheap to clone.
#[derive(Clone)]
pub struct MqttTransport {
    client: AsyncClient,
}

impl MqttTransport {
    pub(crate) fn new(client: AsyncClient) -> Self {
        Self { client }
    }

    /// Ask the event loop to disconnect from the broker.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Client`] if the event loop is already gone.
    pub async fn disconnect(&self) -> Result<(), MqttError> {
        self.client.disconnect().await.map_err(MqttError::Client)
    }
}

impl Transport for MqttTransport {
    /// Queues the subscription without waiting for room in the request
    /// queue, so the event-loop task itself may call it.
    async fn subscribe(&self, topic: &str, qos: QoS) -> Result<(), PublishError> {
        tracing::info!(%topic, ?qos, "subscribing to MQTT topic");
        self.client
            .try_subscribe(topic, to_rumqttc(qos))
            .map_err(MqttError::Client)?;
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>, qos: QoS) -> Result<(), PublishError> {
        tracing::debug!(%topic, bytes = payload.len(), "publishing MQTT message");
        self.client
            .publish(topic, to_rumqttc(qos), false, payload)
            .await
            .map_err(MqttError::Client)?;
        Ok(())
    }
}

pub(crate) fn to_rumqttc(qos: QoS) -> rumqttc::QoS {
    match qos {
        QoS::AtMostOnce => rumqttc::QoS::AtMostOnce,
        QoS::AtLeastOnce => rumqttc::QoS::AtLeastOnce,
        QoS::ExactlyOnce => rumqttc::QoS::ExactlyOnce,
    }
}
