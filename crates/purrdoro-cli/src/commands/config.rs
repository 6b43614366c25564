use clap::Subcommand;
use purrdoro_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as TOML
    Show,
    /// Get a value by dot-separated key
    Get { key: String },
    /// Set a value by dot-separated key
    Set { key: String, value: String },
    /// Manage the focus durations offered by the menu
    Durations {
        #[command(subcommand)]
        action: DurationsAction,
    },
}

#[derive(Subcommand)]
pub enum DurationsAction {
    /// Add a duration (minutes)
    Add { minutes: u32 },
    /// Remove a duration (minutes)
    Remove { minutes: u32 },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::Durations { action } => {
            let mut config = Config::load_or_default();
            match action {
                DurationsAction::Add { minutes } => config.add_duration(minutes),
                DurationsAction::Remove { minutes } => config.remove_duration(minutes),
            }
            config.save()?;
            println!(
                "durations: {}",
                config
                    .timer
                    .available_durations
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    Ok(())
}
