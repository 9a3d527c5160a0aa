//! Falling word entity.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WordId(pub u64);

/// Effect granted by destroying a power word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerKind {
    /// Slow-motion for a few seconds.
    Slow,
    /// One extra life plus a flat bonus.
    ExtraLife,
}

impl PowerKind {
    /// Power words read as their effect name.
    pub fn text(self) -> &'static str {
        match self {
            PowerKind::Slow => "slow",
            PowerKind::ExtraLife => "power",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            PowerKind::Slow => "SLOW",
            PowerKind::ExtraLife => "POWER",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub power: Option<PowerKind>,
    /// Horizontal anchor in percent of playfield width; fixed at spawn.
    pub x: f64,
    /// Top edge in px; grows every tick.
    pub y: f64,
    pub speed: f64,
    pub spawned_at_ms: f64,
}

impl Word {
    pub fn matches_prefix(&self, lower_prefix: &str) -> bool {
        self.text.to_ascii_lowercase().starts_with(lower_prefix)
    }

    pub fn is_power(&self) -> bool {
        self.power.is_some()
    }
}

/// Read-only view handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordView {
    pub id: WordId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub power: Option<PowerKind>,
    pub selected: bool,
    /// Characters of `text` already typed (0 unless selected).
    pub typed_len: usize,
}
