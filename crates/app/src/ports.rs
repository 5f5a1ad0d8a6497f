//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod light_zone;
pub mod message_handler;
pub mod transport;

pub use light_zone::LightZone;
pub use message_handler::MessageHandler;
pub use transport::{QoS, Transport};
