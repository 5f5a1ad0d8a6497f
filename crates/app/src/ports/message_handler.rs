//! Inbound message port — the callback a transport adapter drives.

/// Receives raw messages from the transport.
///
/// Implementations may be called from the transport's own task, outside the
/// host's main loop, and must return after processing the message without
/// waiting on IO.
pub trait MessageHandler: Send + Sync {
    fn on_message(&self, topic: &str, payload: &[u8]);
}
