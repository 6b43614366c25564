use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "purrdoro", version, about = "Purrdoro CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Pet state, feeding and companions
    Pet {
        #[command(subcommand)]
        action: commands::pet::PetAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Focus statistics
    Stats,
    /// Run the live companion loop
    Run(commands::run::RunArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Pet { action } => commands::pet::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Run(args) => commands::run::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
