//! Transport port — the message broker connection, seen from the core.

use std::future::Future;
use std::sync::Arc;

use tinyhouse_domain::error::PublishError;

/// Delivery guarantee requested from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoS {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

/// Narrow publish/subscribe interface over a broker client.
///
/// Inbound messages are delivered separately, through a
/// [`MessageHandler`](super::MessageHandler) the adapter calls.
pub trait Transport: Send + Sync {
    /// Subscribe to `topic`.
    fn subscribe(
        &self,
        topic: &str,
        qos: QoS,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;

    /// Publish `payload` on `topic`.
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        qos: QoS,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn subscribe(
        &self,
        topic: &str,
        qos: QoS,
    ) -> impl Future<Output = Result<(), PublishError>> + Send {
        (**self).subscribe(topic, qos)
    }

    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        qos: QoS,
    ) -> impl Future<Output = Result<(), PublishError>> + Send {
        (**self).publish(topic, payload, qos)
    }
}
