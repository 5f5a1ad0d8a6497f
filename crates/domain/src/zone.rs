//! Zone state and transitions — the local belief about each light zone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::Origin;
use crate::room::RoomId;

/// UTC timestamp recorded when a transition is applied.
pub type Timestamp = DateTime<Utc>;

/// On/off state of a light zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    #[default]
    Off,
    On,
}

impl LightState {
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// The opposite state.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

impl From<bool> for LightState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for LightState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
        }
    }
}

/// Authoritative local belief about one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneState {
    pub zone: RoomId,
    pub is_on: bool,
}

impl ZoneState {
    /// Every zone starts off.
    #[must_use]
    pub fn off(zone: RoomId) -> Self {
        Self { zone, is_on: false }
    }

    #[must_use]
    pub fn light(&self) -> LightState {
        LightState::from(self.is_on)
    }
}

/// Outcome of applying a command to a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The zone was mutated from `previous` to `next`.
    Changed {
        zone: RoomId,
        previous: LightState,
        next: LightState,
        origin: Origin,
        at: Timestamp,
    },
    /// The zone was already in the requested state; nothing was touched.
    Unchanged { zone: RoomId, state: LightState },
}

impl Transition {
    #[must_use]
    pub fn zone(&self) -> RoomId {
        match self {
            Self::Changed { zone, .. } | Self::Unchanged { zone, .. } => *zone,
        }
    }

    /// State of the zone once the command has been handled.
    #[must_use]
    pub fn state(&self) -> LightState {
        match self {
            Self::Changed { next, .. } => *next,
            Self::Unchanged { state, .. } => *state,
        }
    }

    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Whether this transition should be published outward.
    ///
    /// True only for real changes that originated locally.
    #[must_use]
    pub fn should_announce(&self) -> bool {
        matches!(
            self,
            Self::Changed {
                origin: Origin::Local,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(origin: Origin) -> Transition {
        Transition::Changed {
            zone: RoomId::Front,
            previous: LightState::Off,
            next: LightState::On,
            origin,
            at: Utc::now(),
        }
    }

    #[test]
    fn should_default_to_off() {
        assert_eq!(LightState::default(), LightState::Off);
        assert!(!ZoneState::off(RoomId::Bedroom).is_on);
    }

    #[test]
    fn should_flip_state() {
        assert_eq!(LightState::Off.flipped(), LightState::On);
        assert_eq!(LightState::On.flipped(), LightState::Off);
    }

    #[test]
    fn should_convert_from_bool() {
        assert_eq!(LightState::from(true), LightState::On);
        assert_eq!(LightState::from(false), LightState::Off);
    }

    #[test]
    fn should_announce_only_local_changes() {
        assert!(changed(Origin::Local).should_announce());
        assert!(!changed(Origin::Remote).should_announce());

        let noop = Transition::Unchanged {
            zone: RoomId::Front,
            state: LightState::On,
        };
        assert!(!noop.should_announce());
        assert!(!noop.is_change());
    }

    #[test]
    fn should_report_resulting_state() {
        assert_eq!(changed(Origin::Remote).state(), LightState::On);
        assert_eq!(changed(Origin::Remote).zone(), RoomId::Front);
    }

    #[test]
    fn should_serialize_zone_state() {
        let state = ZoneState {
            zone: RoomId::Living,
            is_on: true,
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json, serde_json::json!({"zone": "living", "is_on": true}));
    }
}
