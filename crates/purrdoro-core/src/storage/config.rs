//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Available focus session durations (the menu entries)
//! - Notification and sound toggles
//!
//! Configuration is stored at `~/.config/purrdoro/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Focus timer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Session lengths offered to the user, in minutes. Kept sorted and
    /// deduplicated.
    #[serde(default = "default_durations")]
    pub available_durations: Vec<u32>,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/purrdoro/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_durations() -> Vec<u32> {
    vec![15, 25, 45, 60]
}

fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            available_durations: default_durations(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing and returning the default on a first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timer.available_durations" => Some(
                self.timer
                    .available_durations
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "notifications.enabled" => Some(self.notifications.enabled.to_string()),
            "notifications.sound" => Some(self.notifications.sound.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_bool = |value: &str| {
            value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as bool"),
            })
        };
        match key {
            "notifications.enabled" => self.notifications.enabled = parse_bool(value)?,
            "notifications.sound" => self.notifications.sound = parse_bool(value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }

    /// Add a focus duration to the menu. Keeps the list sorted and unique.
    pub fn add_duration(&mut self, minutes: u32) {
        if !self.timer.available_durations.contains(&minutes) {
            self.timer.available_durations.push(minutes);
            self.timer.available_durations.sort_unstable();
        }
    }

    /// Remove a focus duration from the menu.
    pub fn remove_duration(&mut self, minutes: u32) {
        self.timer.available_durations.retain(|&d| d != minutes);
    }
}
