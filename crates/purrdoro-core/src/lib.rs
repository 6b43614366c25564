//! # Purrdoro Core Library
//!
//! This library provides the core business logic for Purrdoro, a menu-bar
//! companion pet fed by completed focus sessions. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI binary,
//! with any GUI shell being a thin presentation layer over the same core.
//!
//! ## Architecture
//!
//! - **Pet Engine**: A pure satiety/feeding/streak state machine plus a thin
//!   persistence wrapper. Hunger decays over time; completed focus sessions
//!   produce food; cumulative focus time unlocks new companions.
//! - **Focus Timer**: A tick-driven countdown state machine. It has no
//!   internal thread -- the caller is responsible for calling `tick()` once
//!   per second while the timer is running.
//! - **Animation Driver**: Derives a discrete speed state from the current
//!   satiety and drives frame index and horizontal position at a
//!   state-dependent cadence.
//! - **Storage**: SQLite-backed key-value store and session records, plus a
//!   TOML configuration file.
//!
//! ## Key Components
//!
//! - [`SatietyEngine`]: Pet state plus persistence and unlock notifications
//! - [`FocusTimer`]: Countdown timer state machine
//! - [`AnimationDriver`]: Speed-state and position/bounce state machine
//! - [`Database`]: Key-value and session persistence
//! - [`Config`]: Application configuration management

pub mod anim;
pub mod error;
pub mod events;
pub mod notify;
pub mod pet;
pub mod storage;
pub mod timer;

pub use anim::{AnimationDriver, Direction, SpeedState};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use notify::{NotificationSink, NullSink, SoundSink};
pub use pet::{CompanionId, HungerLevel, PetState, SatietyEngine};
pub use storage::{Config, Database};
pub use timer::{FocusTimer, TimerState};
