use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pet::{CompanionId, HungerLevel};
use crate::timer::TimerState;

/// Every externally relevant state change in the system produces an Event.
/// The presentation shell polls for events; sinks subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    FocusStarted {
        minutes: u32,
        at: DateTime<Utc>,
    },
    FocusCancelled {
        /// Seconds that were still on the clock when the session was
        /// abandoned. No food is awarded.
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    FocusCompleted {
        minutes: u32,
        at: DateTime<Utc>,
    },
    /// A completed session produced food, awaiting the feed action.
    FoodReady {
        value: f64,
        at: DateTime<Utc>,
    },
    Fed {
        satiety: f64,
        at: DateTime<Utc>,
    },
    CompanionUnlocked {
        companion: CompanionId,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        streak_days: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        timer_state: TimerState,
        remaining: String,
        progress: f64,
        satiety: f64,
        hunger: HungerLevel,
        pending_food: Option<f64>,
        companion: CompanionId,
        at: DateTime<Utc>,
    },
}
