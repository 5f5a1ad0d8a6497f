//! Light sync service — the entry points the host and the transport call.
//!
//! Inbound messages are decoded and applied as [`Origin::Remote`] without
//! ever being announced back out. Local interactions (switches, motion,
//! the console) are applied as [`Origin::Local`] and announced when they
//! change a zone.
//!
//! Local changes to one room are applied and announced in turn, so the
//! broker sees them in the order they were applied.

use std::collections::BTreeMap;
use std::time::Instant;

use tinyhouse_domain::command::{LightCommand, Origin};
use tinyhouse_domain::error::{PublishError, SyncError};
use tinyhouse_domain::payload;
use tinyhouse_domain::room::RoomId;
use tinyhouse_domain::zone::Transition;
use tokio::sync::{Mutex, MutexGuard};

use crate::ports::{MessageHandler, Transport};
use crate::services::occupancy::OccupancyMonitor;
use crate::services::publisher::Publisher;
use crate::services::sync_controller::SyncController;

/// What happened to the announcement of a local change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Nothing changed, so nothing was published.
    NotNeeded,
    Sent,
    /// Publishing failed; the zone change stands regardless.
    Failed(PublishError),
}

/// Result of a local interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalChange {
    pub transition: Transition,
    pub announcement: Announcement,
}

/// Façade wiring the decoder, the controller and the publisher together.
pub struct LightSyncService<T> {
    controller: SyncController,
    publisher: Publisher<T>,
    occupancy: OccupancyMonitor,
    turns: BTreeMap<RoomId, Mutex<()>>,
}

impl<T: Transport> LightSyncService<T> {
    /// Create a new service.
    pub fn new(controller: SyncController, publisher: Publisher<T>, occupancy: OccupancyMonitor) -> Self {
        let turns = controller
            .registry()
            .rooms()
            .map(|room| (room, Mutex::new(())))
            .collect();
        Self {
            controller,
            publisher,
            occupancy,
            turns,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    /// Decode and apply one inbound payload.
    ///
    /// Every failure is logged and discarded; `None` means the message had no
    /// effect. Nothing is ever published from here.
    pub fn handle_inbound(&self, raw: &[u8]) -> Option<Transition> {
        let cmd = match payload::decode(raw) {
            Ok(cmd) => cmd,
            Err(err) if err.is_skip() => {
                tracing::debug!(%err, "inbound message skipped");
                return None;
            }
            Err(err) => {
                tracing::warn!(%err, payload = %payload::excerpt(raw), "inbound message discarded");
                return None;
            }
        };

        // The controller logs unresolved zones itself.
        self.controller.apply(&cmd, Origin::Remote).ok()
    }

    /// Flip `room` as its wall switch would, then announce the change.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnresolvedZone`] when no zone is bound for `room`.
    pub async fn local_toggle(&self, room: RoomId) -> Result<LocalChange, SyncError> {
        let _turn = self.turn(room).await;
        let transition = self.controller.apply_local_toggle(room)?;
        Ok(self.announce(transition).await)
    }

    /// Drive `room` to `on` from in-house interaction, announcing a change.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnresolvedZone`] when no zone is bound for `room`.
    pub async fn local_set(&self, room: RoomId, on: bool) -> Result<LocalChange, SyncError> {
        let _turn = self.turn(room).await;
        self.set_and_announce(room, on).await
    }

    /// Motion seen in `room`: light it if the room is occupancy-monitored.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnresolvedZone`] when the room is monitored but
    /// no zone is bound for it.
    pub async fn motion(&self, room: RoomId) -> Result<Option<LocalChange>, SyncError> {
        self.motion_at(room, Instant::now()).await
    }

    /// [`motion`](Self::motion) with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// See [`motion`](Self::motion).
    pub async fn motion_at(&self, room: RoomId, now: Instant) -> Result<Option<LocalChange>, SyncError> {
        if !self.occupancy.record_motion(room, now) {
            tracing::trace!(%room, "motion in unmonitored room ignored");
            return Ok(None);
        }
        self.local_set(room, true).await.map(Some)
    }

    /// Switch off monitored rooms that have been idle long enough.
    pub async fn sweep_idle(&self) -> Vec<LocalChange> {
        self.sweep_idle_at(Instant::now()).await
    }

    /// [`sweep_idle`](Self::sweep_idle) with an explicit clock reading.
    pub async fn sweep_idle_at(&self, now: Instant) -> Vec<LocalChange> {
        let mut changes = Vec::new();
        for room in self.occupancy.idle_rooms(now) {
            let _turn = self.turn(room).await;
            if !self.occupancy.take_if_idle(room, now) {
                tracing::trace!(%room, "motion since idle check, light kept on");
                continue;
            }
            tracing::debug!(%room, "room idle, switching light off");
            match self.set_and_announce(room, false).await {
                Ok(change) => changes.push(change),
                Err(err) => tracing::warn!(%err, %room, "idle switch-off failed"),
            }
        }
        changes
    }

    /// Wait for `room`'s turn. Unbound rooms have no turn; applying to them
    /// fails anyway.
    async fn turn(&self, room: RoomId) -> Option<MutexGuard<'_, ()>> {
        match self.turns.get(&room) {
            Some(turn) => Some(turn.lock().await),
            None => None,
        }
    }

    async fn set_and_announce(&self, room: RoomId, on: bool) -> Result<LocalChange, SyncError> {
        let transition = self
            .controller
            .apply(&LightCommand::led(room, on), Origin::Local)?;
        Ok(self.announce(transition).await)
    }

    async fn announce(&self, transition: Transition) -> LocalChange {
        let announcement = if transition.should_announce() {
            match self
                .publisher
                .announce(transition.zone(), transition.state())
                .await
            {
                Ok(()) => Announcement::Sent,
                Err(err) => {
                    tracing::warn!(%err, room = %transition.zone(), "zone change not announced");
                    Announcement::Failed(err)
                }
            }
        } else {
            Announcement::NotNeeded
        };
        LocalChange {
            transition,
            announcement,
        }
    }
}

impl<T: Transport> MessageHandler for LightSyncService<T> {
    fn on_message(&self, topic: &str, payload: &[u8]) {
        tracing::debug!(%topic, bytes = payload.len(), "inbound message");
        self.handle_inbound(payload);
    }
}
