use chrono::Utc;
use clap::Subcommand;
use purrdoro_core::{CompanionId, Config, Database, SatietyEngine, SoundSink, SpeedState};

use super::TerminalSink;

#[derive(Subcommand)]
pub enum PetAction {
    /// Print the pet state as JSON
    Status,
    /// Consume the pending food
    Feed,
    /// Manually override the satiety value (clamped to [0, 100])
    SetSatiety {
        value: f64,
    },
    /// List companions and unlock progress
    Companions,
    /// Switch the displayed companion
    Select {
        /// Companion id (orange, black, white, cow)
        id: String,
    },
}

pub fn run(action: PetAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut engine = SatietyEngine::load(&db, Utc::now());

    match action {
        PetAction::Status => {
            let state = engine.state();
            let status = serde_json::json!({
                "pet": state,
                "hunger": state.hunger_level(),
                "speed_state": SpeedState::classify(state.satiety),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        PetAction::Feed => match engine.feed(&db, Utc::now()) {
            Some(event) => {
                let config = Config::load_or_default();
                if config.notifications.sound {
                    TerminalSink.play("pop");
                }
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            None => println!("No food pending. Complete a focus session first."),
        },
        PetAction::SetSatiety { value } => {
            engine.set_satiety(&db, value);
            println!("satiety = {}", engine.state().satiety);
        }
        PetAction::Companions => {
            let state = engine.state();
            let total_hours = state.total_focus_minutes as f64 / 60.0;
            for companion in CompanionId::ALL {
                let unlocked = state.unlocked.contains(&companion);
                let marker = if companion == state.current_companion {
                    "*"
                } else {
                    " "
                };
                let status = if unlocked {
                    "unlocked".to_string()
                } else {
                    format!(
                        "locked ({:.1}h / {:.0}h)",
                        total_hours,
                        companion.unlock_hours()
                    )
                };
                println!(
                    "{marker} {:<8} {:<14} {status}",
                    companion.as_str(),
                    companion.display_name()
                );
            }
        }
        PetAction::Select { id } => {
            let companion = CompanionId::parse(&id)
                .ok_or_else(|| format!("unknown companion id: {id}"))?;
            if engine.select_companion(&db, companion) {
                println!("Now showing {}", companion.display_name());
            } else {
                return Err(format!(
                    "{} is still locked -- {:.0} focus hours required",
                    companion.display_name(),
                    companion.unlock_hours()
                )
                .into());
            }
        }
    }
    Ok(())
}
