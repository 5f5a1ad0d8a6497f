//! Publisher — announces locally originated zone changes to the broker.

use tinyhouse_domain::error::PublishError;
use tinyhouse_domain::payload;
use tinyhouse_domain::room::RoomId;
use tinyhouse_domain::zone::LightState;

use crate::ports::{QoS, Transport};

/// Formats state announcements and hands them to the [`Transport`].
///
/// Announcing is fire-and-forget relative to local state: a failure is
/// reported to the caller but never undoes the zone change.
pub struct Publisher<T> {
    transport: T,
    topic: String,
    house: String,
}

impl<T: Transport> Publisher<T> {
    /// Create a publisher sending to `topic` on behalf of `house`.
    pub fn new(transport: T, topic: impl Into<String>, house: impl Into<String>) -> Self {
        Self {
            transport,
            topic: topic.into(),
            house: house.into(),
        }
    }

    /// The outbound topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The `house` field carried by every announcement.
    #[must_use]
    pub fn house(&self) -> &str {
        &self.house
    }

    /// Publish `state` for `zone` at exactly-once QoS.
    ///
    /// # Errors
    ///
    /// Returns the [`PublishError`] reported by the transport.
    #[tracing::instrument(skip(self), fields(topic = %self.topic))]
    pub async fn announce(&self, zone: RoomId, state: LightState) -> Result<(), PublishError> {
        let body = payload::encode_state(&self.house, zone, state)
            .map_err(|err| PublishError::Rejected(err.to_string()))?;
        self.transport
            .publish(&self.topic, body, QoS::ExactlyOnce)
            .await?;
        tracing::debug!("zone state announced");
        Ok(())
    }
}
