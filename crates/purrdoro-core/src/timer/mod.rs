mod engine;

pub use engine::{FocusTimer, TimerState};
