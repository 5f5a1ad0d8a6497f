//! Light commands — fully parsed, immutable instructions for a zone.

use std::fmt;

use crate::component::ComponentKind;
use crate::room::RoomId;

/// A decoded instruction: drive `component` of `room` to `value`.
///
/// Fields are private so a command is always fully populated; use
/// [`LightCommand::new`] or [`LightCommand::led`], or decode one from a
/// payload with [`payload::decode`](crate::payload::decode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightCommand {
    room: RoomId,
    component: ComponentKind,
    value: bool,
}

impl LightCommand {
    #[must_use]
    pub fn new(room: RoomId, component: ComponentKind, value: bool) -> Self {
        Self {
            room,
            component,
            value,
        }
    }

    /// Shorthand for a command targeting the room's LED lights.
    #[must_use]
    pub fn led(room: RoomId, value: bool) -> Self {
        Self::new(room, ComponentKind::Led, value)
    }

    #[must_use]
    pub fn room(&self) -> RoomId {
        self.room
    }

    #[must_use]
    pub fn component(&self) -> &ComponentKind {
        &self.component
    }

    /// Requested on/off state.
    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }
}

/// Where a state change request came from.
///
/// Only [`Local`](Self::Local) changes are announced outward; remote ones
/// already exist on the network and would loop back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// In-house interaction (a light switch, motion, the console).
    Local,
    /// A message delivered by the transport.
    Remote,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}
