use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use purrdoro_core::{Config, Database, Event, FocusTimer, NullSink, SatietyEngine};
use purrdoro_core::{NotificationSink, SoundSink};

use super::TerminalSink;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a focus session of the given length in the foreground.
    /// Interrupting the process abandons the session; no food is awarded.
    Start {
        /// Session length in minutes
        minutes: u32,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Start { minutes } => start(minutes),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn start(minutes: u32) -> Result<(), Box<dyn std::error::Error>> {
    if minutes == 0 {
        return Err("session length must be at least one minute".into());
    }

    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut engine = SatietyEngine::load(&db, Utc::now());
    let mut timer = FocusTimer::new();

    let started_at = Utc::now();
    timer
        .start(minutes, started_at)
        .ok_or("a session is already running")?;

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await; // The first tick completes immediately.

    loop {
        ticker.tick().await;
        if let Some(Event::FocusCompleted { minutes, at }) = timer.tick(Utc::now()) {
            println!();

            let events = if config.notifications.enabled {
                engine.complete_focus(&db, minutes, at, &TerminalSink)
            } else {
                engine.complete_focus(&db, minutes, at, &NullSink)
            };

            if let Err(e) = db.record_session(u64::from(minutes), started_at, at) {
                eprintln!("warning: failed to record session: {e}");
            }
            if config.notifications.enabled {
                TerminalSink.notify(
                    "Focus complete!",
                    "Your cat's food is ready -- feed it with `purrdoro pet feed`.",
                );
            }
            if config.notifications.sound {
                TerminalSink.play("complete");
            }

            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            return Ok(());
        }

        print!("\r⏱ {}", timer.formatted_remaining());
        std::io::stdout().flush()?;
    }
}
