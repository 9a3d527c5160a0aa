//! Difficulty modes and their immutable pacing table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Easy,
    Medium,
    Hard,
    Extreme,
}

/// Per-mode pacing multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeDesc {
    pub label: &'static str,
    pub speed_mul: f64,
    pub spawn_rate_mul: f64,
    /// Spawn two generated words joined by a space ("car bike").
    pub combined_words: bool,
}

static EASY: ModeDesc = ModeDesc { label: "Easy", speed_mul: 0.85, spawn_rate_mul: 0.90, combined_words: false };
static MEDIUM: ModeDesc = ModeDesc { label: "Medium", speed_mul: 1.00, spawn_rate_mul: 1.00, combined_words: false };
static HARD: ModeDesc = ModeDesc { label: "Hard", speed_mul: 1.20, spawn_rate_mul: 1.15, combined_words: false };
static EXTREME: ModeDesc = ModeDesc { label: "Extreme", speed_mul: 1.35, spawn_rate_mul: 1.35, combined_words: true };

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Easy, Mode::Medium, Mode::Hard, Mode::Extreme];

    pub fn desc(self) -> &'static ModeDesc {
        match self {
            Mode::Easy => &EASY,
            Mode::Medium => &MEDIUM,
            Mode::Hard => &HARD,
            Mode::Extreme => &EXTREME,
        }
    }

    /// Key used in the persisted high score record.
    pub fn key(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Medium => "medium",
            Mode::Hard => "hard",
            Mode::Extreme => "extreme",
        }
    }

    pub fn label(self) -> &'static str {
        self.desc().label
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.key() == lower)
            .ok_or(SessionError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_extreme_combines_words() {
        for m in Mode::ALL {
            assert_eq!(m.desc().combined_words, m == Mode::Extreme, "{m}");
        }
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("Hard".parse::<Mode>().unwrap(), Mode::Hard);
        assert_eq!(" extreme ".parse::<Mode>().unwrap(), Mode::Extreme);
        assert!(matches!("nightmare".parse::<Mode>(), Err(SessionError::UnknownMode(_))));
    }
}
