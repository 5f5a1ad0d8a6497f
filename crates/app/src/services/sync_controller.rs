//! Sync controller — reconciles light commands against local zone state.
//!
//! Each zone is a two-state machine (`Off` ⇄ `On`). Remote commands and local
//! interactions both go through this controller, which guarantees that a
//! command causes at most one mutation of the bound [`LightZone`] and none
//! at all when the zone is already in the requested state.
//!
//! Every zone has its own mutex held across the read-compare-mutate
//! sequence, so concurrent local and remote requests for the same room are
//! serialized and never act on a stale previous state.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tinyhouse_domain::command::{LightCommand, Origin};
use tinyhouse_domain::error::SyncError;
use tinyhouse_domain::room::RoomId;
use tinyhouse_domain::zone::{LightState, Transition, ZoneState};

use crate::ports::LightZone;
use crate::registry::{ZoneHandle, ZoneRegistry};

/// Owner of every [`ZoneState`] and the only code path that mutates zones.
pub struct SyncController {
    registry: ZoneRegistry,
    states: BTreeMap<RoomId, Mutex<ZoneState>>,
}

impl SyncController {
    /// Take ownership of the registry and force every bound zone off.
    ///
    /// The reset uses [`LightZone::set_state`] and is not a transition:
    /// nothing is announced.
    #[must_use]
    pub fn new(registry: ZoneRegistry) -> Self {
        let mut states = BTreeMap::new();
        for room in registry.rooms() {
            if let Some(zone) = registry.resolve(room) {
                zone.set_state(false);
            }
            states.insert(room, Mutex::new(ZoneState::off(room)));
        }
        tracing::info!(zones = states.len(), "light zones reset to off");
        Self { registry, states }
    }

    /// The registry this controller drives.
    #[must_use]
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// Drive the command's zone to the requested value.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnsupportedComponent`] for non-light commands and
    /// [`SyncError::UnresolvedZone`] when no zone is bound for the room. In
    /// both cases no state is touched.
    #[tracing::instrument(skip(self, cmd), fields(room = %cmd.room(), value = cmd.value()))]
    pub fn apply(&self, cmd: &LightCommand, origin: Origin) -> Result<Transition, SyncError> {
        if !cmd.component().is_light() {
            tracing::warn!(component = %cmd.component(), "command for unsupported component dropped");
            return Err(SyncError::UnsupportedComponent(cmd.component().clone()));
        }

        let (zone, mut state) = self.lock_zone(cmd.room())?;
        let previous = state.light();
        let next = LightState::from(cmd.value());
        if previous == next {
            tracing::debug!(state = %previous, "zone already in requested state");
            return Ok(Transition::Unchanged {
                zone: cmd.room(),
                state: previous,
            });
        }

        zone.set_state(next.is_on());
        state.is_on = next.is_on();
        Ok(changed(cmd.room(), previous, next, origin))
    }

    /// Flip a zone on behalf of in-house interaction (a light switch).
    ///
    /// A toggle always changes the zone.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnresolvedZone`] when no zone is bound for `room`.
    #[tracing::instrument(skip(self))]
    pub fn apply_local_toggle(&self, room: RoomId) -> Result<Transition, SyncError> {
        let (zone, mut state) = self.lock_zone(room)?;
        let previous = state.light();
        let next = previous.flipped();

        zone.toggle();
        state.is_on = next.is_on();
        Ok(changed(room, previous, next, Origin::Local))
    }

    /// Current belief about `room`, if it is bound.
    #[must_use]
    pub fn state(&self, room: RoomId) -> Option<ZoneState> {
        self.states.get(&room).map(|state| *lock(state))
    }

    /// Current belief about every bound zone, in house order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ZoneState> {
        self.states.values().map(|state| *lock(state)).collect()
    }

    fn lock_zone(&self, room: RoomId) -> Result<(ZoneHandle, MutexGuard<'_, ZoneState>), SyncError> {
        match (self.registry.resolve(room), self.states.get(&room)) {
            (Some(zone), Some(state)) => Ok((zone, lock(state))),
            _ => {
                tracing::warn!(%room, "no light zone bound for room, command dropped");
                Err(SyncError::UnresolvedZone(room))
            }
        }
    }
}

fn lock(state: &Mutex<ZoneState>) -> MutexGuard<'_, ZoneState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn changed(zone: RoomId, previous: LightState, next: LightState, origin: Origin) -> Transition {
    tracing::info!(%zone, %previous, %next, %origin, "light zone switched");
    Transition::Changed {
        zone,
        previous,
        next,
        origin,
        at: chrono::Utc::now(),
    }
}
