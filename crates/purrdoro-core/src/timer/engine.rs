//! Focus countdown state machine.
//!
//! The timer is tick-driven. It does not use internal threads -- the caller
//! is responsible for calling `tick()` once per second while the timer is
//! `Running`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Cancelled) -> Idle
//! ```
//!
//! The terminal states are momentary: both natural completion and
//! cancellation immediately reset the session back to `Idle`. There is no
//! pause state, and `start()` while already `Running` is rejected as a
//! no-op rather than silently discarding the in-flight session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// A single countdown session. Ephemeral: never persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    state: TimerState,
    total_seconds: u32,
    remaining_seconds: u32,
}

impl FocusTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            total_seconds: 0,
            remaining_seconds: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Remaining time as zero-padded mm:ss.
    pub fn formatted_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// 0.0 .. 1.0 progress through the session; 0 when not running.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        f64::from(self.total_seconds - self.remaining_seconds) / f64::from(self.total_seconds)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session of `minutes`. Rejected (returns `None`) while a
    /// session is already running.
    pub fn start(&mut self, minutes: u32, now: DateTime<Utc>) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        self.total_seconds = minutes.saturating_mul(60);
        self.remaining_seconds = self.total_seconds;
        self.state = TimerState::Running;
        Some(Event::FocusStarted { minutes, at: now })
    }

    /// Abandon the running session. No food is awarded. Valid only while
    /// `Running`.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let remaining = self.remaining_seconds;
        self.state = TimerState::Cancelled;
        self.reset();
        Some(Event::FocusCancelled {
            remaining_secs: remaining,
            at: now,
        })
    }

    /// One-second tick. Returns `Some(Event::FocusCompleted)` carrying the
    /// completed minutes when the countdown reaches zero; the caller feeds
    /// that into `SatietyEngine::complete_focus`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            let minutes = self.total_seconds / 60;
            self.state = TimerState::Completed;
            self.reset();
            return Some(Event::FocusCompleted { minutes, at: now });
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.total_seconds = 0;
        self.remaining_seconds = 0;
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}
