//! Pure pet state and transition functions.
//!
//! `PetState` holds the satiety resource, unlock progression and streak
//! tracking. Every transition takes the current time explicitly and touches
//! no I/O, so the whole state machine can be exercised in tests without a
//! store or a wall clock. Persistence lives in [`super::engine`].

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::companion::CompanionId;
use crate::events::Event;

/// Satiety ceiling. The floor is 0.
pub const SATIETY_MAX: f64 = 100.0;

/// Hunger decay rate, shared by the running tick and the offline
/// catch-up so behavior is continuous across restarts.
pub const DECAY_PER_MINUTE: f64 = 0.5;

/// Food tiers by completed session length: (minimum minutes, food value).
/// Checked from the longest tier down; the first match wins.
const FOOD_TIERS: [(u32, f64); 4] = [(55, 50.0), (40, 40.0), (20, 25.0), (0, 15.0)];

/// Food value awarded for a completed session of `minutes`.
pub fn food_value(minutes: u32) -> f64 {
    FOOD_TIERS
        .iter()
        .find(|(min, _)| minutes >= *min)
        .map(|(_, value)| *value)
        .unwrap_or(15.0)
}

/// Coarse hunger classification exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HungerLevel {
    /// Satiety 70 and above.
    Full,
    /// Satiety in [30, 70).
    Normal,
    /// Satiety below 30.
    Hungry,
}

/// The pet's complete persistent state.
///
/// All mutating methods are pure transitions: they clamp their inputs,
/// never fail, and return the events the mutation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    /// Hunger resource in [0, 100]; 100 = full, 0 = starving.
    pub satiety: f64,
    /// Currently displayed companion; always a member of `unlocked`.
    pub current_companion: CompanionId,
    /// Unlocked companions. Grows monotonically, never shrinks.
    pub unlocked: BTreeSet<CompanionId>,
    /// Cumulative completed focus minutes; drives unlock checks.
    pub total_focus_minutes: u64,
    /// Count of completed focus sessions.
    pub total_pomodoros: u64,
    /// Consecutive calendar days with at least one completed session.
    pub streak_days: u32,
    /// Calendar day of the last completed session.
    pub last_focus_date: Option<NaiveDate>,
    /// Food earned by a completed session, awaiting `feed()`.
    /// `Some` and the value are set and cleared together by construction.
    pub pending_food: Option<f64>,
    /// Used to compute offline decay on load.
    pub last_feed_time: DateTime<Utc>,
}

impl PetState {
    /// Fresh state for a first-ever run: full satiety, default companion
    /// unlocked, all counters zero.
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut unlocked = BTreeSet::new();
        unlocked.insert(CompanionId::default());
        Self {
            satiety: SATIETY_MAX,
            current_companion: CompanionId::default(),
            unlocked,
            total_focus_minutes: 0,
            total_pomodoros: 0,
            streak_days: 0,
            last_focus_date: None,
            pending_food: None,
            last_feed_time: now,
        }
    }

    pub fn hunger_level(&self) -> HungerLevel {
        if self.satiety >= 70.0 {
            HungerLevel::Full
        } else if self.satiety >= 30.0 {
            HungerLevel::Normal
        } else {
            HungerLevel::Hungry
        }
    }

    /// Apply the hunger accumulated while the process was not running:
    /// 0.5 per minute since `last_feed_time`. Runs exactly once, at load,
    /// after all fields are initialized.
    pub fn apply_offline_decay(&mut self, now: DateTime<Utc>) {
        let elapsed_min = (now - self.last_feed_time).num_seconds() as f64 / 60.0;
        if elapsed_min > 0.0 {
            self.satiety = clamp_satiety(self.satiety - elapsed_min * DECAY_PER_MINUTE);
        }
    }

    /// Running decay path, invoked once per simulated minute.
    pub fn decay_tick(&mut self) {
        self.satiety = clamp_satiety(self.satiety - DECAY_PER_MINUTE);
    }

    /// Record a completed focus session of `minutes`.
    ///
    /// Awards pending food by session length, bumps the totals, then runs
    /// the unlock check and the streak update, in that order.
    pub fn complete_focus(&mut self, minutes: u32, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();

        let value = food_value(minutes);
        self.pending_food = Some(value);
        events.push(Event::FoodReady { value, at: now });

        self.total_focus_minutes += u64::from(minutes);
        self.total_pomodoros += 1;

        for companion in self.check_unlocks() {
            events.push(Event::CompanionUnlocked { companion, at: now });
        }

        self.update_streak(now.date_naive());
        events.push(Event::StreakUpdated {
            streak_days: self.streak_days,
            at: now,
        });

        events
    }

    /// Consume the pending food, if any. A no-op when nothing is pending,
    /// so repeated calls are idempotent.
    pub fn feed(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let value = self.pending_food.take()?;
        self.satiety = clamp_satiety(self.satiety + value);
        self.last_feed_time = now;
        Some(Event::Fed {
            satiety: self.satiety,
            at: now,
        })
    }

    /// Switch the displayed companion. Rejected (returns false) unless the
    /// companion is already unlocked.
    pub fn select_companion(&mut self, id: CompanionId) -> bool {
        if self.unlocked.contains(&id) {
            self.current_companion = id;
            true
        } else {
            false
        }
    }

    /// Debug override for the satiety value. Out-of-range input is clamped,
    /// never rejected.
    pub fn set_satiety(&mut self, value: f64) {
        self.satiety = clamp_satiety(value);
    }

    /// Unlock every companion whose threshold is now met.
    /// Returns the newly unlocked companions.
    fn check_unlocks(&mut self) -> Vec<CompanionId> {
        let total_hours = self.total_focus_minutes as f64 / 60.0;
        let mut newly = Vec::new();
        for companion in CompanionId::ALL {
            if total_hours >= companion.unlock_hours() && self.unlocked.insert(companion) {
                newly.push(companion);
            }
        }
        newly
    }

    /// Update the consecutive-day streak for a session completed on `today`.
    fn update_streak(&mut self, today: NaiveDate) {
        match self.last_focus_date {
            None => self.streak_days = 1,
            Some(last_day) => {
                let days_diff = (today - last_day).num_days();
                if days_diff == 1 {
                    self.streak_days += 1;
                } else if days_diff > 1 {
                    self.streak_days = 1;
                }
                // days_diff == 0: already counted today.
                // days_diff < 0: clock moved backward; leave the streak alone.
            }
        }
        self.last_focus_date = Some(today);
    }
}

fn clamp_satiety(value: f64) -> f64 {
    value.clamp(0.0, SATIETY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn food_value_tiers() {
        assert_eq!(food_value(0), 15.0);
        assert_eq!(food_value(19), 15.0);
        assert_eq!(food_value(20), 25.0);
        assert_eq!(food_value(39), 25.0);
        assert_eq!(food_value(40), 40.0);
        assert_eq!(food_value(54), 40.0);
        assert_eq!(food_value(55), 50.0);
        assert_eq!(food_value(200), 50.0);
    }

    #[test]
    fn new_state_is_full_with_default_companion() {
        let state = PetState::new(t0());
        assert_eq!(state.satiety, SATIETY_MAX);
        assert_eq!(state.current_companion, CompanionId::Orange);
        assert!(state.unlocked.contains(&CompanionId::Orange));
        assert_eq!(state.streak_days, 0);
        assert!(state.pending_food.is_none());
    }

    #[test]
    fn offline_decay_after_two_hours() {
        let mut state = PetState::new(t0());
        state.apply_offline_decay(t0() + Duration::minutes(120));
        assert_eq!(state.satiety, 40.0);
    }

    #[test]
    fn offline_decay_clamps_at_zero() {
        let mut state = PetState::new(t0());
        state.apply_offline_decay(t0() + Duration::days(30));
        assert_eq!(state.satiety, 0.0);
    }

    #[test]
    fn offline_decay_ignores_backward_clock() {
        let mut state = PetState::new(t0());
        state.apply_offline_decay(t0() - Duration::minutes(60));
        assert_eq!(state.satiety, SATIETY_MAX);
    }

    #[test]
    fn decay_tick_drops_half_point_and_clamps() {
        let mut state = PetState::new(t0());
        state.decay_tick();
        assert_eq!(state.satiety, 99.5);

        state.set_satiety(0.2);
        state.decay_tick();
        assert_eq!(state.satiety, 0.0);
        state.decay_tick();
        assert_eq!(state.satiety, 0.0);
    }

    #[test]
    fn complete_focus_awards_food_and_counts() {
        let mut state = PetState::new(t0());
        let events = state.complete_focus(25, t0());
        assert_eq!(state.pending_food, Some(25.0));
        assert_eq!(state.total_focus_minutes, 25);
        assert_eq!(state.total_pomodoros, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::FoodReady { value, .. } if *value == 25.0)));
    }

    #[test]
    fn feed_without_pending_food_is_idempotent() {
        let mut state = PetState::new(t0());
        state.set_satiety(50.0);
        let before = state.clone();
        for _ in 0..5 {
            assert!(state.feed(t0()).is_none());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn feed_consumes_pending_food_and_clamps() {
        let mut state = PetState::new(t0());
        state.set_satiety(90.0);
        state.complete_focus(55, t0());
        let fed_at = t0() + Duration::minutes(1);
        let event = state.feed(fed_at).unwrap();
        assert!(matches!(event, Event::Fed { satiety, .. } if satiety == 100.0));
        assert_eq!(state.satiety, 100.0);
        assert!(state.pending_food.is_none());
        assert_eq!(state.last_feed_time, fed_at);
    }

    #[test]
    fn streak_counts_consecutive_days_and_breaks_on_gap() {
        let mut state = PetState::new(t0());

        state.complete_focus(25, t0());
        assert_eq!(state.streak_days, 1);

        state.complete_focus(25, t0() + Duration::days(1));
        assert_eq!(state.streak_days, 2);

        // Day 3 skipped; day 4 starts over.
        state.complete_focus(25, t0() + Duration::days(3));
        assert_eq!(state.streak_days, 1);
    }

    #[test]
    fn second_session_same_day_leaves_streak_unchanged() {
        let mut state = PetState::new(t0());
        state.complete_focus(25, t0());
        state.complete_focus(25, t0() + Duration::hours(3));
        assert_eq!(state.streak_days, 1);
    }

    #[test]
    fn backward_clock_leaves_streak_alone_but_advances_date() {
        let mut state = PetState::new(t0());
        state.complete_focus(25, t0() + Duration::days(1));
        state.complete_focus(25, t0() + Duration::days(2));
        assert_eq!(state.streak_days, 2);

        let yesterday = t0();
        state.complete_focus(25, yesterday);
        assert_eq!(state.streak_days, 2);
        assert_eq!(state.last_focus_date, Some(yesterday.date_naive()));
    }

    #[test]
    fn unlocks_follow_cumulative_hours() {
        let mut state = PetState::new(t0());

        // 4h59m: nothing new.
        state.complete_focus(299, t0());
        assert!(!state.unlocked.contains(&CompanionId::Black));

        // Crosses 5h.
        let events = state.complete_focus(1, t0());
        assert!(state.unlocked.contains(&CompanionId::Black));
        assert!(events.iter().any(
            |e| matches!(e, Event::CompanionUnlocked { companion, .. } if *companion == CompanionId::Black)
        ));

        // Crosses 15h and 30h in one long stretch; both unlock at once.
        state.complete_focus(30 * 60, t0());
        assert!(state.unlocked.contains(&CompanionId::White));
        assert!(state.unlocked.contains(&CompanionId::Cow));
    }

    #[test]
    fn select_companion_requires_unlock() {
        let mut state = PetState::new(t0());
        assert!(!state.select_companion(CompanionId::Cow));
        assert_eq!(state.current_companion, CompanionId::Orange);

        state.complete_focus(30 * 60, t0());
        assert!(state.select_companion(CompanionId::Cow));
        assert_eq!(state.current_companion, CompanionId::Cow);
    }

    #[test]
    fn set_satiety_clamps_out_of_range_input() {
        let mut state = PetState::new(t0());
        state.set_satiety(250.0);
        assert_eq!(state.satiety, 100.0);
        state.set_satiety(-10.0);
        assert_eq!(state.satiety, 0.0);
    }

    #[test]
    fn hunger_level_boundaries() {
        let mut state = PetState::new(t0());
        state.set_satiety(70.0);
        assert_eq!(state.hunger_level(), HungerLevel::Full);
        state.set_satiety(69.9);
        assert_eq!(state.hunger_level(), HungerLevel::Normal);
        state.set_satiety(30.0);
        assert_eq!(state.hunger_level(), HungerLevel::Normal);
        state.set_satiety(29.9);
        assert_eq!(state.hunger_level(), HungerLevel::Hungry);
    }
}
