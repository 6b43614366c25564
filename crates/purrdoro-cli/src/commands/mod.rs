pub mod config;
pub mod pet;
pub mod run;
pub mod stats;
pub mod timer;

use purrdoro_core::{NotificationSink, SoundSink};

/// Terminal-backed sinks: notifications go to stderr, sounds print a
/// marker instead of playing audio.
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, title: &str, body: &str) {
        eprintln!("🔔 {title} {body}");
    }
}

impl SoundSink for TerminalSink {
    fn play(&self, name: &str) {
        eprintln!("🔊 ({name})");
    }
}
