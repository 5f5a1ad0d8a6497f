//! Application services — use-case implementations.
//!
//! Services accept port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod light_sync_service;
pub mod occupancy;
pub mod publisher;
pub mod sync_controller;
