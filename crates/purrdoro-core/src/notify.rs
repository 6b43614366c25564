//! Collaborator sinks for notifications and sounds.
//!
//! The core never talks to the OS notification center or audio device
//! directly. It calls these traits and treats every call as fire-and-forget:
//! a sink that fails to deliver is not an engine error.

/// Delivers a user-visible notification.
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str);
}

/// Plays a named sound effect.
pub trait SoundSink {
    fn play(&self, name: &str);
}

/// Sink that discards everything. Used in tests and headless contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _title: &str, _body: &str) {}
}

impl SoundSink for NullSink {
    fn play(&self, _name: &str) {}
}
