//! Difficulty presets: each one fixes the gravity interval

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Available difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "One row per second",
            Difficulty::Medium => "One row every 0.7 seconds",
            Difficulty::Hard => "One row every 0.4 seconds",
        }
    }

    /// Time between gravity steps
    pub fn drop_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(1000),
            Difficulty::Medium => Duration::from_millis(700),
            Difficulty::Hard => Duration::from_millis(400),
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}
