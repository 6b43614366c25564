//! The live companion loop.
//!
//! Drives the three periodic cadences on one single-threaded runtime, so
//! every mutation of the shared state is naturally serialized:
//! - hunger decay, every 60 seconds, for the lifetime of the process;
//! - the focus countdown, every second, while a session is running;
//! - the animation cadence, at the current speed state's interval,
//!   restarted whenever the speed state changes.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Args;
use purrdoro_core::pet::HungerLevel;
use purrdoro_core::{
    AnimationDriver, Config, Database, Direction, Event, FocusTimer, NotificationSink, NullSink,
    PetState, SatietyEngine, SoundSink,
};
use tokio::time::{interval, interval_at, Instant};

use super::TerminalSink;

#[derive(Args)]
pub struct RunArgs {
    /// Start a focus session of this many minutes when the loop starts
    #[arg(long)]
    pub focus: Option<u32>,
    /// Feed automatically as soon as food is ready
    #[arg(long)]
    pub auto_feed: bool,
    /// Width of the terminal track the pet runs on
    #[arg(long, default_value_t = 40)]
    pub track: u32,
    /// Emit one StateSnapshot JSON line per animation tick instead of
    /// drawing the track (for piping into a GUI shell)
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    main_loop(args)
}

#[tokio::main(flavor = "current_thread")]
async fn main_loop(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut engine = SatietyEngine::load(&db, Utc::now());
    let mut timer = FocusTimer::new();
    let mut driver = AnimationDriver::new(0.0, f64::from(args.track.max(1) - 1));

    let mut session_started: Option<DateTime<Utc>> = None;
    if let Some(minutes) = args.focus {
        let now = Utc::now();
        if timer.start(minutes, now).is_some() {
            session_started = Some(now);
        }
    }

    let mut decay = interval(Duration::from_secs(60));
    decay.tick().await; // The first tick completes immediately.
    let mut countdown = interval(Duration::from_secs(1));
    countdown.tick().await;
    let first_cadence = driver.speed_state().frame_interval();
    let mut cadence = interval_at(Instant::now() + first_cadence, first_cadence);

    loop {
        tokio::select! {
            _ = decay.tick() => {
                engine.decay_tick(&db);
            }
            _ = countdown.tick() => {
                if let Some(Event::FocusCompleted { minutes, at }) = timer.tick(Utc::now()) {
                    on_session_complete(
                        &db, &config, &mut engine, minutes, at,
                        session_started.take(), args.auto_feed,
                    );
                }
            }
            _ = cadence.tick() => {
                let tick = driver.tick(engine.state().satiety);
                if tick.speed_changed {
                    // The cadence is state-dependent: reschedule the
                    // timer, not just the frame content.
                    cadence = interval_at(Instant::now() + tick.interval, tick.interval);
                }
                if args.json {
                    println!("{}", serde_json::to_string(&snapshot(engine.state(), &timer))?);
                } else {
                    render(engine.state(), &timer, &driver, args.track as usize)?;
                }
            }
        }
    }
}

fn on_session_complete(
    db: &Database,
    config: &Config,
    engine: &mut SatietyEngine,
    minutes: u32,
    at: DateTime<Utc>,
    started: Option<DateTime<Utc>>,
    auto_feed: bool,
) {
    if config.notifications.enabled {
        engine.complete_focus(db, minutes, at, &TerminalSink);
        TerminalSink.notify("Focus complete!", "Your cat's food is ready.");
    } else {
        engine.complete_focus(db, minutes, at, &NullSink);
    }
    if config.notifications.sound {
        TerminalSink.play("complete");
    }
    if let Some(started_at) = started {
        if let Err(e) = db.record_session(u64::from(minutes), started_at, at) {
            eprintln!("warning: failed to record session: {e}");
        }
    }
    if auto_feed {
        engine.feed(db, Utc::now());
    }
}

/// Full state snapshot for machine consumers.
fn snapshot(state: &PetState, timer: &FocusTimer) -> Event {
    Event::StateSnapshot {
        timer_state: timer.state(),
        remaining: timer.formatted_remaining(),
        progress: timer.progress(),
        satiety: state.satiety,
        hunger: state.hunger_level(),
        pending_food: state.pending_food,
        companion: state.current_companion,
        at: Utc::now(),
    }
}

/// Status line composition: pending food wins, then a running countdown,
/// then the idle marker; a hungry pet always appends its complaint.
fn status_line(state: &PetState, timer: &FocusTimer) -> String {
    let mut line = if state.pending_food.is_some() {
        "🐟 feed me".to_string()
    } else if timer.is_running() {
        format!("⏱ {}", timer.formatted_remaining())
    } else {
        "🐱".to_string()
    };
    if state.hunger_level() == HungerLevel::Hungry {
        line.push_str(" 😿");
    }
    line
}

fn render(
    state: &PetState,
    timer: &FocusTimer,
    driver: &AnimationDriver,
    width: usize,
) -> Result<(), std::io::Error> {
    let width = width.max(1);
    let pos = (driver.position_x().round() as usize).min(width - 1);
    let glyph = match driver.direction() {
        Direction::Left => '<',
        Direction::Right => '>',
    };
    let mut track: Vec<char> = vec!['·'; width];
    track[pos] = glyph;
    let track: String = track.into_iter().collect();

    let mut out = std::io::stdout();
    write!(
        out,
        "\r[{track}] {} satiety {:>3.0}",
        status_line(state, timer),
        state.satiety
    )?;
    out.flush()
}
