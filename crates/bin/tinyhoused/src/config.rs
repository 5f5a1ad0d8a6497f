//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `tinyhouse.toml` in the working directory (or the path in
//! `TINYHOUSE_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use tinyhouse_adapter_mqtt::MqttConfig;
use tinyhouse_adapter_virtual::ZoneProfile;
use tinyhouse_domain::room::RoomId;

const DEFAULT_PATH: &str = "tinyhouse.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// House identity.
    pub house: HouseConfig,
    /// Broker connection and topics.
    pub mqtt: MqttConfig,
    /// Per-room light zones.
    pub zones: ZonesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// House identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    /// Value of the `house` field in announcements.
    pub name: String,
}

/// One table per room. A table present in the file replaces that room's
/// defaults as a whole.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ZonesConfig {
    pub front: ZoneConfig,
    pub living: ZoneConfig,
    pub bathroom: ZoneConfig,
    pub bedroom: ZoneConfig,
}

/// Light zone settings for one room.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Bind a zone for this room at all.
    pub enabled: bool,
    /// Play the switch click.
    pub click: bool,
    /// Fan started this many milliseconds after the lights.
    pub fan_delay_ms: Option<u64>,
    /// Motion-driven lights switched off after this many idle seconds.
    pub idle_timeout_secs: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("TINYHOUSE_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TINYHOUSE_HOUSE") {
            self.house.name = val;
        }
        if let Ok(val) = std::env::var("TINYHOUSE_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Ok(val) = std::env::var("TINYHOUSE_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.broker_port = port;
            }
        }
        if let Ok(val) = std::env::var("TINYHOUSE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation("broker port must be non-zero".to_string()));
        }
        if self.mqtt.inbound_topic.is_empty() || self.mqtt.outbound_topic.is_empty() {
            return Err(ConfigError::Validation("MQTT topics must be non-empty".to_string()));
        }
        if self.mqtt.inbound_topic == self.mqtt.outbound_topic {
            return Err(ConfigError::Validation(
                "inbound and outbound topics must differ".to_string(),
            ));
        }
        if !self.zones.iter().any(|(_, zone)| zone.enabled) {
            return Err(ConfigError::Validation("at least one zone must be enabled".to_string()));
        }
        Ok(())
    }
}

impl ZonesConfig {
    /// Every room with its settings, in house order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &ZoneConfig)> {
        [
            (RoomId::Front, &self.front),
            (RoomId::Living, &self.living),
            (RoomId::Bathroom, &self.bathroom),
            (RoomId::Bedroom, &self.bedroom),
        ]
        .into_iter()
    }
}

impl ZoneConfig {
    /// Accessories for the virtual zone.
    #[must_use]
    pub fn profile(&self) -> ZoneProfile {
        let mut profile = ZoneProfile::default();
        if !self.click {
            profile = profile.without_click();
        }
        if let Some(delay) = self.fan_delay_ms {
            profile = profile.with_fan(Duration::from_millis(delay));
        }
        profile
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            name: "tinyhouse".to_string(),
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            front: ZoneConfig {
                idle_timeout_secs: Some(5),
                ..ZoneConfig::default()
            },
            living: ZoneConfig::default(),
            bathroom: ZoneConfig {
                fan_delay_ms: Some(500),
                ..ZoneConfig::default()
            },
            bedroom: ZoneConfig::default(),
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            click: true,
            fan_delay_ms: None,
            idle_timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "tinyhoused=info,tinyhouse_app=info,tinyhouse_adapter_mqtt=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyhouse_adapter_virtual::FanProfile;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.house.name, "tinyhouse");
        assert_eq!(config.mqtt.inbound_topic, "sandbox/fromMiddleHouse");
        assert_eq!(config.zones.front.idle_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(
            config.zones.bathroom.profile().fan,
            Some(FanProfile {
                start_delay: Duration::from_millis(500)
            })
        );
        assert!(config.zones.iter().all(|(_, zone)| zone.enabled));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.mqtt.broker_port, 1883);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [house]
            name = 'cabin'

            [mqtt]
            broker_host = 'broker.local'
            inbound_topic = 'cabin/in'
            outbound_topic = 'cabin/out'

            [zones.bedroom]
            enabled = false

            [zones.living]
            click = false
            fan_delay_ms = 250

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.house.name, "cabin");
        assert_eq!(config.mqtt.broker_host, "broker.local");
        assert_eq!(config.mqtt.outbound_topic, "cabin/out");
        assert!(!config.zones.bedroom.enabled);
        let living = config.zones.living.profile();
        assert!(!living.click);
        assert_eq!(
            living.fan.map(|fan| fan.start_delay),
            Some(Duration::from_millis(250))
        );
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_replace_room_defaults_with_present_table() {
        let toml = "
            [zones.front]
            click = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.zones.front.idle_timeout().is_none());
        assert!(config.zones.bathroom.fan_delay_ms.is_some());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.mqtt.broker_port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_identical_topics() {
        let mut config = Config::default();
        config.mqtt.outbound_topic = config.mqtt.inbound_topic.clone();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_topic() {
        let mut config = Config::default();
        config.mqtt.inbound_topic = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_when_every_zone_is_disabled() {
        let mut config = Config::default();
        config.zones.front.enabled = false;
        config.zones.living.enabled = false;
        config.zones.bathroom.enabled = false;
        config.zones.bedroom.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
