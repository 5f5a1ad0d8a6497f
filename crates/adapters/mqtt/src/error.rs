//! MQTT adapter error types.

use tinyhouse_domain::error::PublishError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client could not queue the request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The connection to the broker failed.
    #[error("MQTT connection error")]
    Connection(#[source] rumqttc::ConnectionError),
}

impl MqttError {
    /// Convert into a [`PublishError`] for propagation across the transport
    /// port.
    #[must_use]
    pub fn into_publish(self) -> PublishError {
        match self {
            // The request queue is full; the event loop is still alive.
            Self::Client(err @ rumqttc::ClientError::TryRequest(_)) => {
                PublishError::Rejected(err.to_string())
            }
            _ => PublishError::TransportUnavailable,
        }
    }
}

impl From<MqttError> for PublishError {
    fn from(err: MqttError) -> Self {
        err.into_publish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_connection_error() {
        let err = MqttError::Connection(rumqttc::ConnectionError::RequestsDone);
        assert_eq!(err.to_string(), "MQTT connection error");
    }

    #[test]
    fn should_convert_connection_error_to_unavailable() {
        let err: PublishError = MqttError::Connection(rumqttc::ConnectionError::RequestsDone).into();
        assert_eq!(err, PublishError::TransportUnavailable);
    }
}
