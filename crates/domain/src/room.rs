//! Room identifiers — the closed set of addressable light zones in the house.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownRoomError;

/// A room of the tiny house that owns one light zone.
///
/// The set is closed: a room name outside of it never maps to a default zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomId {
    Front,
    Living,
    Bathroom,
    Bedroom,
}

impl RoomId {
    /// Every room, in house order.
    pub const ALL: [Self; 4] = [Self::Front, Self::Living, Self::Bathroom, Self::Bedroom];

    /// The wire name of the room (`front`, `living`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Living => "living",
            Self::Bathroom => "bathroom",
            Self::Bedroom => "bedroom",
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomId {
    type Err = UnknownRoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|room| room.as_str() == s)
            .ok_or_else(|| UnknownRoomError(s.to_string()))
    }
}
