// Dataset invariants for the word lists.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use typing_rush::words::{
    EASY_STAGES, EASY_STAGE_THRESHOLDS, SUFFIXES, SYLLABLES, THEMED_POOLS, easy_stage_from_clears,
};

fn all_lowercase(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

#[test]
fn easy_stage_entries_are_unique_and_lowercase() {
    for (i, stage) in EASY_STAGES.iter().enumerate() {
        let mut seen = HashSet::new();
        for w in stage.iter() {
            assert!(seen.insert(*w), "duplicate '{}' in easy stage {}", w, i + 1);
            assert!(all_lowercase(w), "invalid easy word '{}'", w);
        }
    }
}

#[test]
fn easy_stages_get_longer() {
    let avg = |s: &[&str]| s.iter().map(|w| w.len()).sum::<usize>() as f64 / s.len() as f64;
    for pair in EASY_STAGES.windows(2) {
        assert!(avg(pair[0]) < avg(pair[1]), "stage word length did not grow");
    }
}

#[test]
fn thresholds_cover_every_stage() {
    assert_eq!(EASY_STAGE_THRESHOLDS.len(), EASY_STAGES.len());
    assert_eq!(EASY_STAGE_THRESHOLDS[0], 0);
    assert!(EASY_STAGE_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
    for (i, &t) in EASY_STAGE_THRESHOLDS.iter().enumerate() {
        assert_eq!(easy_stage_from_clears(t), i + 1);
    }
}

#[test]
fn procedural_parts_are_lowercase() {
    for w in SYLLABLES.iter().chain(SUFFIXES.iter()) {
        assert!(all_lowercase(w), "invalid fragment '{}'", w);
    }
    for pool in THEMED_POOLS.iter() {
        assert!(!pool.is_empty());
        for w in pool.iter() {
            assert!(all_lowercase(w), "invalid themed word '{}'", w);
        }
    }
}
