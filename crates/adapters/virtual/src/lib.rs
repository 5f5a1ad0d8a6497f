//! # tinyhouse-adapter-virtual
//!
//! Simulated light zones standing in for the in-world fixtures.
//!
//! ## Accessories
//!
//! | Accessory | Profile field | Behaviour |
//! |-----------|---------------|-----------|
//! | Switch click | `click` | Effect on every change |
//! | Fixtures & emissive covers | always | Follow the zone state |
//! | Ceiling fan | `fan` | Starts `start_delay` after the lights, stops with them |
//!
//! A pending fan start is a cancelable deferred task: switching the zone off
//! before it fires aborts it.
//!
//! ## Dependency rule
//!
//! Depends on `tinyhouse-app` (port traits) and `tinyhouse-domain` only.

mod profile;
mod zone;

pub use profile::{FanProfile, ZoneProfile};
pub use zone::{Effect, VirtualLightZone};

use std::sync::Arc;

use tinyhouse_app::registry::{RegistryError, ZoneRegistry};

/// Build a registry binding each zone to its own room.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateBinding`] if two zones share a room.
pub fn registry_for(
    zones: impl IntoIterator<Item = Arc<VirtualLightZone>>,
) -> Result<ZoneRegistry, RegistryError> {
    zones
        .into_iter()
        .fold(ZoneRegistry::builder(), |builder, zone| builder.bind(zone.room(), zone))
        .build()
}
