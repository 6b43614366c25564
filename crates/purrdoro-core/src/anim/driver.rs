//! Animation speed-state and position machine.
//!
//! The driver owns no satiety: it reclassifies the speed state from the
//! value handed to each cadence tick. The cadence itself is state-dependent,
//! so a state transition must reschedule the next tick at the new interval,
//! not merely change frame content -- `tick()` reports both.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::frames;

/// Discrete animation tier derived from satiety.
///
/// The classification is a total, non-overlapping partition of [0, 100]
/// with inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedState {
    /// Satiety below 20: the pet sits still.
    Stopped,
    /// Satiety in [20, 50).
    Slow,
    /// Satiety in [50, 70).
    Normal,
    /// Satiety 70 and above.
    Fast,
}

impl SpeedState {
    /// Classify a satiety value. Pure; recomputed at every read.
    pub fn classify(satiety: f64) -> SpeedState {
        if satiety < 20.0 {
            SpeedState::Stopped
        } else if satiety < 50.0 {
            SpeedState::Slow
        } else if satiety < 70.0 {
            SpeedState::Normal
        } else {
            SpeedState::Fast
        }
    }

    /// Time between frame advances in this state.
    pub fn frame_interval(self) -> Duration {
        match self {
            SpeedState::Stopped => Duration::from_millis(300),
            SpeedState::Slow => Duration::from_millis(150),
            SpeedState::Normal => Duration::from_millis(100),
            SpeedState::Fast => Duration::from_millis(70),
        }
    }

    /// Horizontal pixels moved per position update.
    pub fn step_px(self) -> f64 {
        match self {
            SpeedState::Stopped => 0.0,
            SpeedState::Slow => 2.0,
            SpeedState::Normal => 5.0,
            SpeedState::Fast => 7.0,
        }
    }
}

/// Horizontal facing. Purely cosmetic: it selects the mirrored frame set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Result of one cadence tick.
#[derive(Debug, Clone, Copy)]
pub struct CadenceTick {
    /// The speed state changed; the caller must restart its tick timer
    /// at `interval`.
    pub speed_changed: bool,
    /// Interval until the next tick, per the current speed state.
    pub interval: Duration,
}

/// Frame-index and position state machine.
///
/// Ephemeral and derived: never persisted, recomputed from satiety on
/// every tick.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    speed: SpeedState,
    frame_index: usize,
    direction: Direction,
    position_x: f64,
    /// Turn-around bound on the left.
    left_bound: f64,
    /// Starting bound (screen edge or a configured inset).
    right_bound: f64,
}

impl AnimationDriver {
    /// Create a driver bouncing between `left_bound` and `right_bound`.
    /// The pet starts at the right bound, facing left.
    pub fn new(left_bound: f64, right_bound: f64) -> Self {
        Self {
            speed: SpeedState::Stopped,
            frame_index: 0,
            direction: Direction::Left,
            position_x: right_bound,
            left_bound,
            right_bound,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn speed_state(&self) -> SpeedState {
        self.speed
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position_x(&self) -> f64 {
        self.position_x
    }

    /// Current frame grid, already mirrored for the facing direction.
    pub fn current_frame(&self) -> Option<frames::FrameGrid> {
        frames::frame(self.speed, self.direction, self.frame_index)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One cadence tick: reclassify from `satiety`, advance the frame and
    /// the position. When the state changed, the frame cycle restarts and
    /// the returned interval differs from the previous one -- the caller
    /// must reschedule, not just redraw.
    pub fn tick(&mut self, satiety: f64) -> CadenceTick {
        let next = SpeedState::classify(satiety);
        let speed_changed = next != self.speed;
        if speed_changed {
            self.speed = next;
            self.frame_index = 0;
            if next == SpeedState::Stopped {
                // No coasting while starving: back to the start bound,
                // initial facing.
                self.position_x = self.right_bound;
                self.direction = Direction::Left;
            }
        }
        self.frame_index = (self.frame_index + 1) % frames::frame_count(self.speed);
        self.step_position();
        CadenceTick {
            speed_changed,
            interval: self.speed.frame_interval(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn step_position(&mut self) {
        let step = self.speed.step_px();
        if step == 0.0 {
            return;
        }
        match self.direction {
            Direction::Left => {
                self.position_x -= step;
                if self.position_x <= self.left_bound {
                    self.position_x = self.left_bound;
                    self.direction = Direction::Right;
                }
            }
            Direction::Right => {
                self.position_x += step;
                if self.position_x >= self.right_bound {
                    self.position_x = self.right_bound;
                    self.direction = Direction::Left;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(SpeedState::classify(0.0), SpeedState::Stopped);
        assert_eq!(SpeedState::classify(19.9), SpeedState::Stopped);
        assert_eq!(SpeedState::classify(20.0), SpeedState::Slow);
        assert_eq!(SpeedState::classify(49.9), SpeedState::Slow);
        assert_eq!(SpeedState::classify(50.0), SpeedState::Normal);
        assert_eq!(SpeedState::classify(69.9), SpeedState::Normal);
        assert_eq!(SpeedState::classify(70.0), SpeedState::Fast);
        assert_eq!(SpeedState::classify(100.0), SpeedState::Fast);
    }

    #[test]
    fn state_change_restarts_frame_cycle_and_cadence() {
        let mut driver = AnimationDriver::new(10.0, 500.0);

        let first = driver.tick(100.0);
        assert!(first.speed_changed);
        assert_eq!(first.interval, Duration::from_millis(70));
        assert_eq!(driver.frame_index(), 1);

        driver.tick(100.0);
        driver.tick(100.0);
        assert_eq!(driver.frame_index(), 3);

        // Drop into Slow: cycle restarts at the new cadence.
        let tick = driver.tick(40.0);
        assert!(tick.speed_changed);
        assert_eq!(tick.interval, Duration::from_millis(150));
        assert_eq!(driver.frame_index(), 1);
    }

    #[test]
    fn steady_state_keeps_cadence() {
        let mut driver = AnimationDriver::new(10.0, 500.0);
        driver.tick(60.0);
        let tick = driver.tick(60.0);
        assert!(!tick.speed_changed);
        assert_eq!(tick.interval, Duration::from_millis(100));
    }

    #[test]
    fn frame_index_wraps_around_cycle() {
        let mut driver = AnimationDriver::new(10.0, 500.0);
        driver.tick(100.0); // frame 1 after the state change
        driver.tick(100.0);
        driver.tick(100.0);
        driver.tick(100.0); // wraps back to 0
        assert_eq!(driver.frame_index(), 0);
    }

    #[test]
    fn bounces_between_bounds() {
        let mut driver = AnimationDriver::new(0.0, 20.0);
        // Fast: 7 px per tick, starting at 20 heading left.
        driver.tick(100.0); // 13
        driver.tick(100.0); // 6
        assert_eq!(driver.direction(), Direction::Left);
        driver.tick(100.0); // clamps to 0, reverses
        assert_eq!(driver.position_x(), 0.0);
        assert_eq!(driver.direction(), Direction::Right);
        driver.tick(100.0); // 7
        driver.tick(100.0); // 14
        driver.tick(100.0); // clamps to 20, reverses
        assert_eq!(driver.position_x(), 20.0);
        assert_eq!(driver.direction(), Direction::Left);
    }

    #[test]
    fn stopped_resets_position_and_facing() {
        let mut driver = AnimationDriver::new(0.0, 100.0);
        driver.tick(100.0);
        driver.tick(100.0);
        driver.tick(100.0);
        assert!(driver.position_x() < 100.0);

        driver.tick(5.0);
        assert_eq!(driver.speed_state(), SpeedState::Stopped);
        assert_eq!(driver.position_x(), 100.0);
        assert_eq!(driver.direction(), Direction::Left);

        // And it stays put while starving.
        driver.tick(5.0);
        assert_eq!(driver.position_x(), 100.0);
    }

    #[test]
    fn stopped_still_animates_the_sit_cycle() {
        let mut driver = AnimationDriver::new(0.0, 100.0);
        driver.tick(0.0);
        assert_eq!(driver.frame_index(), 1);
        driver.tick(0.0);
        assert_eq!(driver.frame_index(), 0);
        assert!(driver.current_frame().is_some());
    }
}
