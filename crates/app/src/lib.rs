//! # tinyhouse-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `LightZone` — an on/off light zone supplied by the host
//!   - `Transport` — publish/subscribe over a message broker
//!   - `MessageHandler` — the inbound callback a transport drives
//! - Hold the read-only `ZoneRegistry` (room → light zone)
//! - Provide the use-cases:
//!   - `SyncController` — idempotent, per-zone serialized state transitions
//!   - `Publisher` — announces local changes outward
//!   - `LightSyncService` — inbound ingestion and local interaction
//!   - `OccupancyMonitor` — motion lights with idle switch-off
//!
//! ## Dependency rule
//! Depends on `tinyhouse-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod registry;
pub mod services;
