//! Tunable constants for a run.
//!
//! Every number that shapes pacing lives here so the browser host can pass a
//! JSON override (`TypingRush::with_tuning`) without recompiling. Missing
//! fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Storage key for the per-mode high score record.
pub const HIGH_SCORES_KEY: &str = "typing-invaders-highscores-v1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run.
    pub starting_lives: i32,
    /// Nominal fall rate in px/s before hardness, mode and slow-motion scaling.
    pub base_fall_rate: f64,
    /// Distance from the bottom edge of the playfield to the floor line.
    pub floor_margin: f64,
    /// Vertical position of freshly spawned words (above the visible top).
    pub spawn_y: f64,
    /// Every Nth spawn is forced to be a power word.
    pub power_cadence: u32,
    pub slow_weight: u32,
    pub extra_life_weight: u32,
    /// Slow-motion granted per "slow" word, in milliseconds.
    pub slow_duration_ms: f64,
    /// Fall speed multiplier while slow-motion is active.
    pub slow_fall_factor: f64,
    /// Spawn interval multiplier while slow-motion is active.
    pub slow_spawn_stretch: f64,
    pub extra_life_bonus: u64,
    /// Maximum snapshot notifications per second.
    pub notify_hz: f64,
    /// Lifetime of the burst effect left behind by a destroyed word.
    pub burst_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            base_fall_rate: 60.0,
            floor_margin: 48.0,
            spawn_y: -40.0,
            power_cadence: 15,
            slow_weight: 6,
            extra_life_weight: 4,
            slow_duration_ms: 6000.0,
            slow_fall_factor: 0.2,
            slow_spawn_stretch: 3.0,
            extra_life_bonus: 20,
            notify_hz: 30.0,
            burst_ms: 450.0,
        }
    }
}

impl Tuning {
    /// Parse a partial JSON override on top of the defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Size of the playfield in CSS pixels as reported by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Playfield {
    pub const FALLBACK_WIDTH: f64 = 800.0;
    pub const FALLBACK_HEIGHT: f64 = 560.0;

    /// Zero-sized layouts (element not laid out yet) use the fallback size.
    pub fn new(width: f64, height: f64) -> Self {
        let width = if width > 0.0 { width } else { Self::FALLBACK_WIDTH };
        let height = if height > 0.0 { height } else { Self::FALLBACK_HEIGHT };
        Self { width, height }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(Self::FALLBACK_WIDTH, Self::FALLBACK_HEIGHT)
    }
}
