mod config;
pub mod database;

pub use config::Config;
pub use database::{Database, SessionRecord, Stats};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/purrdoro[-dev]/` based on PURRDORO_ENV.
///
/// Set PURRDORO_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PURRDORO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("purrdoro-dev")
    } else {
        base_dir.join("purrdoro")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
