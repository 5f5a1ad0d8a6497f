//! Virtual light zone — fixtures, emissive covers, click and fan.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tinyhouse_app::ports::LightZone;
use tinyhouse_domain::room::RoomId;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::profile::ZoneProfile;

/// Observable side effect of a zone change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Click,
    /// Fixtures lit and covers made emissive.
    LightsOn,
    LightsOff,
    /// Fan start deferred until its delay elapses.
    FanScheduled,
    FanStarted,
    /// A pending fan start was dropped before it fired.
    FanCancelled,
    FanStopped,
}

#[derive(Default)]
struct Inner {
    on: bool,
    fan_running: bool,
    pending_fan: Option<JoinHandle<()>>,
    effects: Vec<Effect>,
}

/// A simulated light zone.
///
/// [`set_state`](LightZone::set_state) is a no-op when the zone is already in
/// the requested state; otherwise it behaves like a [`toggle`](LightZone::toggle).
pub struct VirtualLightZone {
    room: RoomId,
    profile: ZoneProfile,
    inner: Arc<Mutex<Inner>>,
}

impl VirtualLightZone {
    #[must_use]
    pub fn new(room: RoomId, profile: ZoneProfile) -> Self {
        Self {
            room,
            profile,
            inner: Arc::default(),
        }
    }

    #[must_use]
    pub fn room(&self) -> RoomId {
        self.room
    }

    #[must_use]
    pub fn profile(&self) -> ZoneProfile {
        self.profile
    }

    /// Every effect produced so far, oldest first.
    #[must_use]
    pub fn effects(&self) -> Vec<Effect> {
        lock(&self.inner).effects.clone()
    }

    #[must_use]
    pub fn fan_running(&self) -> bool {
        lock(&self.inner).fan_running
    }

    fn switch(&self, inner: &mut Inner, on: bool) {
        if self.profile.click {
            inner.effects.push(Effect::Click);
        }
        inner.on = on;
        inner.effects.push(if on { Effect::LightsOn } else { Effect::LightsOff });
        tracing::debug!(room = %self.room, on, "virtual fixtures switched");

        if on {
            self.schedule_fan(inner);
        } else {
            if let Some(pending) = inner.pending_fan.take() {
                pending.abort();
                inner.effects.push(Effect::FanCancelled);
            }
            if inner.fan_running {
                inner.fan_running = false;
                inner.effects.push(Effect::FanStopped);
            }
        }
    }

    fn schedule_fan(&self, inner: &mut Inner) {
        let Some(fan) = self.profile.fan else {
            return;
        };
        if inner.fan_running || inner.pending_fan.is_some() {
            return;
        }

        match Handle::try_current() {
            Ok(handle) => {
                let shared = Arc::clone(&self.inner);
                let room = self.room;
                inner.pending_fan = Some(handle.spawn(start_fan_after(shared, room, fan.start_delay)));
                inner.effects.push(Effect::FanScheduled);
            }
            Err(_) => {
                tracing::debug!(room = %self.room, "no async runtime, fan started without delay");
                inner.fan_running = true;
                inner.effects.push(Effect::FanStarted);
            }
        }
    }
}

async fn start_fan_after(inner: Arc<Mutex<Inner>>, room: RoomId, delay: Duration) {
    tokio::time::sleep(delay).await;
    let mut inner = lock(&inner);
    inner.pending_fan = None;
    if inner.on && !inner.fan_running {
        inner.fan_running = true;
        inner.effects.push(Effect::FanStarted);
        tracing::debug!(%room, "virtual fan started");
    }
}

impl LightZone for VirtualLightZone {
    fn set_state(&self, on: bool) {
        let mut inner = lock(&self.inner);
        if inner.on != on {
            self.switch(&mut inner, on);
        }
    }

    fn toggle(&self) {
        let mut inner = lock(&self.inner);
        let on = !inner.on;
        self.switch(&mut inner, on);
    }

    fn is_on(&self) -> bool {
        lock(&self.inner).on
    }
}

impl Drop for VirtualLightZone {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.inner).pending_fan.take() {
            pending.abort();
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bathroom() -> VirtualLightZone {
        VirtualLightZone::new(
            RoomId::Bathroom,
            ZoneProfile::default().with_fan(Duration::from_millis(500)),
        )
    }

    #[test]
    fn should_start_off() {
        let zone = VirtualLightZone::new(RoomId::Front, ZoneProfile::default());
        assert!(!zone.is_on());
        assert!(zone.effects().is_empty());
    }

    #[test]
    fn should_click_and_light_on_toggle() {
        let zone = VirtualLightZone::new(RoomId::Front, ZoneProfile::default());
        zone.toggle();
        assert!(zone.is_on());
        assert_eq!(zone.effects(), vec![Effect::Click, Effect::LightsOn]);
    }

    #[test]
    fn should_skip_click_when_profile_has_none() {
        let zone = VirtualLightZone::new(RoomId::Living, ZoneProfile::default().without_click());
        zone.set_state(true);
        assert_eq!(zone.effects(), vec![Effect::LightsOn]);
    }

    #[test]
    fn should_do_nothing_when_set_to_current_state() {
        let zone = VirtualLightZone::new(RoomId::Bedroom, ZoneProfile::default());
        zone.set_state(false);
        assert!(zone.effects().is_empty());
    }

    #[test]
    fn should_start_fan_immediately_without_runtime() {
        let zone = bathroom();
        zone.set_state(true);
        assert!(zone.fan_running());
        assert_eq!(
            zone.effects(),
            vec![Effect::Click, Effect::LightsOn, Effect::FanStarted]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_start_fan_after_delay() {
        let zone = bathroom();
        zone.set_state(true);
        assert!(!zone.fan_running());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!zone.fan_running());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(zone.fan_running());
        assert_eq!(
            zone.effects(),
            vec![
                Effect::Click,
                Effect::LightsOn,
                Effect::FanScheduled,
                Effect::FanStarted
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_cancel_pending_fan_when_switched_off() {
        let zone = bathroom();
        zone.toggle();
        zone.toggle();

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(!zone.fan_running());
        assert_eq!(
            zone.effects(),
            vec![
                Effect::Click,
                Effect::LightsOn,
                Effect::FanScheduled,
                Effect::Click,
                Effect::LightsOff,
                Effect::FanCancelled,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_running_fan_when_switched_off() {
        let zone = bathroom();
        zone.set_state(true);
        tokio::time::sleep(Duration::from_secs(1)).await;

        zone.set_state(false);

        assert!(!zone.fan_running());
        assert_eq!(zone.effects().last(), Some(&Effect::FanStopped));
    }
}
