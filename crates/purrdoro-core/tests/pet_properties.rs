//! Property tests over the pure pet state machine and the animation
//! classification.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use purrdoro_core::pet::{PetState, SATIETY_MAX};
use purrdoro_core::{CompanionId, FocusTimer, SpeedState};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

/// One externally reachable mutation of the pet state.
#[derive(Debug, Clone)]
enum Op {
    DecayTick,
    CompleteFocus { minutes: u32, day_offset: i64 },
    Feed,
    SetSatiety(f64),
    OfflineDecay { minutes_elapsed: i64 },
    Select(CompanionId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::DecayTick),
        (0u32..300, 0i64..10).prop_map(|(minutes, day_offset)| Op::CompleteFocus {
            minutes,
            day_offset
        }),
        Just(Op::Feed),
        (-50.0f64..150.0).prop_map(Op::SetSatiety),
        (0i64..100_000).prop_map(|minutes_elapsed| Op::OfflineDecay { minutes_elapsed }),
        (0usize..CompanionId::ALL.len()).prop_map(|i| Op::Select(CompanionId::ALL[i])),
    ]
}

fn apply(state: &mut PetState, op: &Op) {
    match op {
        Op::DecayTick => state.decay_tick(),
        Op::CompleteFocus { minutes, day_offset } => {
            state.complete_focus(*minutes, t0() + Duration::days(*day_offset));
        }
        Op::Feed => {
            state.feed(t0());
        }
        Op::SetSatiety(v) => state.set_satiety(*v),
        Op::OfflineDecay { minutes_elapsed } => {
            state.apply_offline_decay(t0() + Duration::minutes(*minutes_elapsed));
        }
        Op::Select(id) => {
            state.select_companion(*id);
        }
    }
}

proptest! {
    #[test]
    fn satiety_always_within_bounds(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut state = PetState::new(t0());
        for op in &ops {
            apply(&mut state, op);
            prop_assert!(state.satiety >= 0.0 && state.satiety <= SATIETY_MAX);
        }
    }

    #[test]
    fn unlocked_set_only_grows(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut state = PetState::new(t0());
        let mut seen = state.unlocked.clone();
        for op in &ops {
            apply(&mut state, op);
            prop_assert!(state.unlocked.is_superset(&seen));
            seen = state.unlocked.clone();
        }
    }

    #[test]
    fn current_companion_is_always_unlocked(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut state = PetState::new(t0());
        for op in &ops {
            apply(&mut state, op);
            prop_assert!(state.unlocked.contains(&state.current_companion));
        }
    }

    #[test]
    fn totals_never_decrease(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut state = PetState::new(t0());
        let (mut minutes, mut pomodoros) = (0, 0);
        for op in &ops {
            apply(&mut state, op);
            prop_assert!(state.total_focus_minutes >= minutes);
            prop_assert!(state.total_pomodoros >= pomodoros);
            minutes = state.total_focus_minutes;
            pomodoros = state.total_pomodoros;
        }
    }

    #[test]
    fn feed_without_pending_food_changes_nothing(n in 0usize..8) {
        let mut state = PetState::new(t0());
        state.set_satiety(42.0);
        let before = state.clone();
        for _ in 0..n {
            state.feed(t0());
        }
        prop_assert_eq!(state, before);
    }

    #[test]
    fn speed_state_partitions_the_satiety_range(satiety in 0.0f64..=100.0) {
        let expected = if satiety < 20.0 {
            SpeedState::Stopped
        } else if satiety < 50.0 {
            SpeedState::Slow
        } else if satiety < 70.0 {
            SpeedState::Normal
        } else {
            SpeedState::Fast
        };
        prop_assert_eq!(SpeedState::classify(satiety), expected);
    }

    #[test]
    fn cancelled_sessions_produce_no_completion(start_min in 1u32..120, ticks in 0u32..60) {
        let mut timer = FocusTimer::new();
        timer.start(start_min, t0());
        // A partial session never emits a completion on any tick.
        for _ in 0..ticks {
            prop_assert!(timer.tick(t0()).is_none());
        }
        // Cancelling drops the session entirely; nothing reaches the pet,
        // so totals and pending food are untouched by construction.
        prop_assert!(timer.cancel(t0()).is_some());
        prop_assert!(!timer.is_running());
        prop_assert!(timer.tick(t0()).is_none());
    }
}
