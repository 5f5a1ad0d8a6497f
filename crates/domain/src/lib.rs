//! # tinyhouse-domain
//!
//! Pure domain model for the tiny-house light synchronisation service.
//!
//! ## Responsibilities
//! - Closed set of **rooms** ([`room::RoomId`]), each owning one light zone
//! - **Components** a message may target ([`component::ComponentKind`])
//! - Fully parsed **light commands** and their origin ([`command`])
//! - **Zone state** and the **transitions** applied to it ([`zone`])
//! - The wire **payload codec**: decoding inbound messages, encoding
//!   announcements ([`payload`])
//! - The error taxonomy ([`error`])
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod command;
pub mod component;
pub mod payload;
pub mod room;
pub mod zone;
