//! Score arithmetic for destroyed words.

/// Bonus for the `combo`-th consecutive clear (combo counts this clear).
pub fn combo_bonus(combo: u32) -> u64 {
    (combo.saturating_sub(1) as f64 * 2.5).floor() as u64
}

/// Base value of a word: length counts every character including the space.
pub fn base_score(text: &str) -> u64 {
    10 + 5 * text.chars().count() as u64
}

/// Points for clearing `text` as the `combo`-th consecutive clear.
pub fn word_score(text: &str, combo: u32) -> u64 {
    base_score(text) + combo_bonus(combo)
}

/// Slow-motion expiry after collecting a slow word at `now_ms`.
pub fn extend_slow_motion(current_until_ms: f64, now_ms: f64, duration_ms: f64) -> f64 {
    current_until_ms.max(now_ms) + duration_ms
}
