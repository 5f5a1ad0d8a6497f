//! Zone registry — which light zone each room drives.
//!
//! Built once at startup by explicit registration and read-only afterwards,
//! so lookups need no locking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tinyhouse_domain::room::RoomId;

use crate::ports::LightZone;

/// Shared handle to a bound light zone.
pub type ZoneHandle = Arc<dyn LightZone>;

/// Errors raised while building a [`ZoneRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The same room was bound to two zones.
    #[error("room {0} is bound more than once")]
    DuplicateBinding(RoomId),
}

/// Immutable mapping from [`RoomId`] to the zone it controls.
pub struct ZoneRegistry {
    zones: BTreeMap<RoomId, ZoneHandle>,
}

impl ZoneRegistry {
    /// Create a builder for constructing a [`ZoneRegistry`].
    #[must_use]
    pub fn builder() -> ZoneRegistryBuilder {
        ZoneRegistryBuilder::default()
    }

    /// The zone bound for `room`, or `None` when this deployment left the
    /// room unbound.
    #[must_use]
    pub fn resolve(&self, room: RoomId) -> Option<ZoneHandle> {
        self.zones.get(&room).cloned()
    }

    /// Bound rooms, in house order.
    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.zones.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl fmt::Debug for ZoneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneRegistry")
            .field("rooms", &self.zones.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Step-by-step builder for [`ZoneRegistry`].
#[derive(Default)]
pub struct ZoneRegistryBuilder {
    bindings: Vec<(RoomId, ZoneHandle)>,
}

impl ZoneRegistryBuilder {
    /// Bind `room` to `zone`.
    #[must_use]
    pub fn bind(mut self, room: RoomId, zone: ZoneHandle) -> Self {
        self.bindings.push((room, zone));
        self
    }

    /// Consume the builder and return the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateBinding`] if a room was bound twice.
    pub fn build(self) -> Result<ZoneRegistry, RegistryError> {
        let mut zones = BTreeMap::new();
        for (room, zone) in self.bindings {
            if zones.insert(room, zone).is_some() {
                return Err(RegistryError::DuplicateBinding(room));
            }
        }
        Ok(ZoneRegistry { zones })
    }
}
