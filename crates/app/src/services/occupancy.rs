//! Occupancy monitor — motion-driven lights with an idle timeout.
//!
//! Rooms registered with an idle timeout light up on motion and go dark once
//! no motion has been seen for the timeout. The monitor only keeps time; the
//! light changes themselves go through the sync controller.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tinyhouse_domain::room::RoomId;

/// Tracks the last motion seen in each monitored room.
#[derive(Debug, Default)]
pub struct OccupancyMonitor {
    timeouts: BTreeMap<RoomId, Duration>,
    last_motion: Mutex<BTreeMap<RoomId, Instant>>,
}

impl OccupancyMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Monitor `room`, switching it off after `idle` without motion.
    #[must_use]
    pub fn with_idle_timeout(mut self, room: RoomId, idle: Duration) -> Self {
        self.timeouts.insert(room, idle);
        self
    }

    #[must_use]
    pub fn monitors(&self, room: RoomId) -> bool {
        self.timeouts.contains_key(&room)
    }

    /// Record motion in `room` at `now`. Returns `false` if the room is not
    /// monitored.
    pub fn record_motion(&self, room: RoomId, now: Instant) -> bool {
        if !self.monitors(room) {
            return false;
        }
        self.last_motion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(room, now);
        true
    }

    /// Rooms idle for at least their timeout at `now`.
    ///
    /// This only looks; claim each room with [`take_if_idle`](Self::take_if_idle)
    /// before acting on it.
    pub fn idle_rooms(&self, now: Instant) -> Vec<RoomId> {
        self.last_motion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(room, seen)| self.is_idle(**room, **seen, now))
            .map(|(room, _)| *room)
            .collect()
    }

    /// Forget `room` if it is still idle at `now`.
    ///
    /// Returns `false` when motion was recorded since the room was seen idle,
    /// or when the idle period was already claimed. Each idle period is
    /// claimed once.
    pub fn take_if_idle(&self, room: RoomId, now: Instant) -> bool {
        let mut last_motion = self
            .last_motion
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match last_motion.get(&room) {
            Some(seen) if self.is_idle(room, *seen, now) => {
                last_motion.remove(&room);
                true
            }
            _ => false,
        }
    }

    fn is_idle(&self, room: RoomId, seen: Instant, now: Instant) -> bool {
        self.timeouts
            .get(&room)
            .is_some_and(|timeout| now.saturating_duration_since(seen) >= *timeout)
    }
}
