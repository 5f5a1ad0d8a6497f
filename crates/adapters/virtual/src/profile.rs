//! Zone profiles — which accessories a virtual zone carries.

use std::time::Duration;

/// Accessories attached to a light zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneProfile {
    /// Play the switch click on every change.
    pub click: bool,
    /// Ceiling fan that follows the lights.
    pub fan: Option<FanProfile>,
}

impl Default for ZoneProfile {
    fn default() -> Self {
        Self {
            click: true,
            fan: None,
        }
    }
}

impl ZoneProfile {
    /// Profile with a fan starting `start_delay` after the lights.
    #[must_use]
    pub fn with_fan(mut self, start_delay: Duration) -> Self {
        self.fan = Some(FanProfile { start_delay });
        self
    }

    #[must_use]
    pub fn without_click(mut self) -> Self {
        self.click = false;
        self
    }
}

/// A fan spun up after the lights come on and stopped with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanProfile {
    pub start_delay: Duration,
}
