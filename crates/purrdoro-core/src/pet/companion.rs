//! Unlockable companion variants.
//!
//! Companions are gated by cumulative focus hours. The table is static:
//! the set of variants and their thresholds never changes at runtime.

use serde::{Deserialize, Serialize};

/// A pet variant. The default companion is always unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionId {
    Orange,
    Black,
    White,
    Cow,
}

impl CompanionId {
    pub const ALL: [CompanionId; 4] = [
        CompanionId::Orange,
        CompanionId::Black,
        CompanionId::White,
        CompanionId::Cow,
    ];

    /// Cumulative focus hours required to unlock this companion.
    pub fn unlock_hours(self) -> f64 {
        match self {
            CompanionId::Orange => 0.0,
            CompanionId::Black => 5.0,
            CompanionId::White => 15.0,
            CompanionId::Cow => 30.0,
        }
    }

    /// Human-readable display name.
    pub fn display_name(self) -> &'static str {
        match self {
            CompanionId::Orange => "Orange Tabby",
            CompanionId::Black => "Black Cat",
            CompanionId::White => "White Cat",
            CompanionId::Cow => "Cow Cat",
        }
    }

    /// Stable identifier used in the kv store and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            CompanionId::Orange => "orange",
            CompanionId::Black => "black",
            CompanionId::White => "white",
            CompanionId::Cow => "cow",
        }
    }

    /// Parse a stored identifier. Unknown strings map to `None` so a
    /// corrupted kv entry falls back to the documented default.
    pub fn parse(s: &str) -> Option<CompanionId> {
        match s {
            "orange" => Some(CompanionId::Orange),
            "black" => Some(CompanionId::Black),
            "white" => Some(CompanionId::White),
            "cow" => Some(CompanionId::Cow),
            _ => None,
        }
    }
}

impl Default for CompanionId {
    fn default() -> Self {
        CompanionId::Orange
    }
}

impl std::fmt::Display for CompanionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
