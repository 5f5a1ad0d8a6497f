//! Light zone port — the on/off unit a room's switch controls.

use std::sync::Arc;

/// An addressable on/off light zone supplied by the host environment.
///
/// Side effects (fixtures, emissive covers, fans, click sounds) are the
/// implementation's business. Calls must not block on IO: they run from
/// transport callbacks.
pub trait LightZone: Send + Sync {
    /// Drive the zone to `on`.
    fn set_state(&self, on: bool);

    /// Flip the zone, as a physical switch would.
    fn toggle(&self);

    /// Whether the zone's fixtures are currently lit.
    fn is_on(&self) -> bool;
}

impl<T: LightZone + ?Sized> LightZone for Arc<T> {
    fn set_state(&self, on: bool) {
        (**self).set_state(on);
    }

    fn toggle(&self) {
        (**self).toggle();
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}
