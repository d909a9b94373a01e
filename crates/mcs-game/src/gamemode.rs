//! Player game modes.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    /// Parse a mode name case-insensitively. Anything unrecognised is
    /// survival.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "creative" | "c" | "1" => Self::Creative,
            "adventure" | "a" | "2" => Self::Adventure,
            "spectator" | "sp" | "3" => Self::Spectator,
            _ => Self::Survival,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Creative => "creative",
            Self::Adventure => "adventure",
            Self::Spectator => "spectator",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
