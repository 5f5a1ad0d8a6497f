//! MQTT connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the MQTT transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic light commands arrive on.
    pub inbound_topic: String,
    /// Topic local state changes are announced on.
    pub outbound_topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause after a connection error before polling again, in seconds.
    pub reconnect_delay_secs: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MqttConfig {
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reconnect_delay_secs))
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "tinyhouse".to_string(),
            inbound_topic: "sandbox/fromMiddleHouse".to_string(),
            outbound_topic: "sandbox/toMiddleHouse".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            username: None,
            password: None,
        }
    }
}
