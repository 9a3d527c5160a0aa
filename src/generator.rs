//! Word text generation per mode, stage and elapsed time.

use rand::Rng;

use crate::mode::Mode;
use crate::rng::{pick, uniform};
use crate::words::{EASY_STAGES, MISC, SUFFIXES, SYLLABLES, THEMED_POOLS};

/// Seconds of play after which generated words reach full complexity.
pub const HARDNESS_RAMP_SECS: f64 = 120.0;

/// Generation complexity in `[0, 1]` after `elapsed_secs` of play.
pub fn hardness(elapsed_secs: f64) -> f64 {
    (elapsed_secs / HARDNESS_RAMP_SECS).clamp(0.0, 1.0)
}

/// Text for a regular (non-power) spawn.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, mode: Mode, elapsed_secs: f64, stage: usize) -> String {
    if mode == Mode::Easy {
        let pool = EASY_STAGES[stage.clamp(1, EASY_STAGES.len()) - 1];
        return pick(rng, pool).to_string();
    }
    if mode.desc().combined_words {
        let first = make_word(rng, elapsed_secs);
        let second = make_word(rng, elapsed_secs);
        return format!("{first} {second}");
    }
    make_word(rng, elapsed_secs)
}

/// Procedural word: either syllable soup or a themed base word.
pub fn make_word<R: Rng + ?Sized>(rng: &mut R, elapsed_secs: f64) -> String {
    let hard = hardness(elapsed_secs);
    if rng.gen_bool(0.55) {
        // 2..=5 syllables, upper bound opens up with hardness
        let count = 2 + uniform(rng, 0.0, 2.0 + hard * 2.0).floor() as usize;
        let mut word: String = (0..count).map(|_| pick(rng, SYLLABLES)).collect();
        if rng.gen_bool(0.25) {
            let cut = uniform(rng, 1.0, 3.0).floor() as usize;
            word = format!("{}{}", pick(rng, MISC), &word[cut.min(word.len())..]);
        }
        word
    } else {
        let pool = THEMED_POOLS[rng.gen_range(0..THEMED_POOLS.len())];
        let base = pick(rng, pool);
        if hard > 0.7 && rng.gen_bool(0.35) {
            format!("{base}{}", pick(rng, SUFFIXES))
        } else {
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    fn is_plain(word: &str) -> bool {
        !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
    }

    #[test]
    fn easy_words_come_from_stage_pool() {
        let mut rng = seeded(7);
        for stage in 1..=EASY_STAGES.len() {
            for _ in 0..50 {
                let w = generate(&mut rng, Mode::Easy, 0.0, stage);
                assert!(EASY_STAGES[stage - 1].contains(&w.as_str()), "{w} not in stage {stage}");
            }
        }
    }

    #[test]
    fn procedural_words_are_lowercase_letters() {
        let mut rng = seeded(11);
        for i in 0..2000 {
            let t = (i % 300) as f64;
            let w = generate(&mut rng, Mode::Hard, t, 1);
            assert!(is_plain(&w), "bad word {w:?}");
        }
    }

    #[test]
    fn extreme_words_have_one_interior_space() {
        let mut rng = seeded(3);
        for _ in 0..500 {
            let w = generate(&mut rng, Mode::Extreme, 200.0, 1);
            let parts: Vec<&str> = w.split(' ').collect();
            assert_eq!(parts.len(), 2, "{w:?}");
            assert!(parts.iter().all(|p| is_plain(p)), "{w:?}");
        }
    }

    #[test]
    fn suffixes_only_appear_late() {
        let mut rng = seeded(5);
        let themed: Vec<&str> = THEMED_POOLS.iter().flat_map(|p| p.iter().copied()).collect();
        for _ in 0..2000 {
            let w = make_word(&mut rng, 30.0);
            let suffixed = SUFFIXES.iter().any(|s| {
                w.strip_suffix(s).is_some_and(|base| themed.contains(&base))
            });
            assert!(!suffixed, "early suffix on {w}");
        }
    }
}
