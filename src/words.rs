//! Word datasets: easy-mode stage lists and the procedural building blocks
//! used by the other modes. All entries are lowercase ASCII.

/// Clears needed to reach stage 1..=5 in easy mode.
pub const EASY_STAGE_THRESHOLDS: [u32; 5] = [0, 15, 35, 60, 90];

pub const EASY_STAGES: [&[&str]; 5] = [
    &[
        "at", "am", "an", "as", "be", "do", "go", "he", "hi", "in", "is", "it", "me", "my", "no",
        "of", "on", "or", "so", "to", "up", "us", "we", "you", "the",
    ],
    &[
        "cat", "dog", "sun", "run", "car", "bus", "cap", "map", "pen", "bed", "cup", "egg", "jam",
        "jar", "fox", "cow", "red", "box", "hat", "web", "log", "rug", "bug", "pig", "rat",
    ],
    &[
        "play", "star", "frog", "ship", "tree", "blue", "pink", "kite", "sand", "milk", "boat",
        "desk", "bird", "fish", "moon", "rain", "fire", "wind", "rock", "land",
    ],
    &[
        "apple", "tiger", "table", "water", "smile", "robot", "music", "pizza", "house", "grape",
        "light", "grass", "bread", "chair", "plane", "beach", "field", "story",
    ],
    &[
        "yellow", "silver", "planet", "garden", "rocket", "school", "friend", "window", "flower",
        "bridge", "bottle", "circle", "clouds", "dragon", "forest",
    ],
];

pub const SYLLABLES: &[&str] = &[
    "zo", "ra", "ve", "ka", "qua", "tri", "mon", "nel", "phi", "dex", "lum", "xen", "vex", "zor",
    "kai", "mi", "no", "ta", "po", "li", "ri", "su", "ne", "fi", "ga", "do", "hu", "shi", "tor",
    "lyn", "ark",
];

pub const ANIMALS: &[&str] = &[
    "panda", "otter", "falcon", "badger", "mamba", "yak", "iguana", "viper", "heron", "puma",
    "ocelot", "tapir", "eagle", "emu", "koala", "stoat", "dingo",
];

pub const TECH: &[&str] = &[
    "pixel", "socket", "kernel", "script", "buffer", "render", "shader", "driver", "module",
    "packet", "router", "cipher", "quartz", "bitrate", "quantum",
];

pub const MISC: &[&str] = &[
    "ember", "groove", "tempo", "vortex", "tidal", "zephyr", "ripple", "blitz", "saffron",
    "nectar", "cobalt", "prism", "flume", "glimmer", "marble", "onyx",
];

pub const THEMED_POOLS: [&[&str]; 3] = [ANIMALS, TECH, MISC];

pub const SUFFIXES: &[&str] = &["ify", "tron", "ware", "scope", "craft", "core", "link", "flux"];

/// Easy-mode stage (1-based) reached after `clears` destroyed words.
pub fn easy_stage_from_clears(clears: u32) -> usize {
    let stage = EASY_STAGE_THRESHOLDS
        .iter()
        .rposition(|&t| clears >= t)
        .map_or(1, |i| i + 1);
    stage.clamp(1, EASY_STAGES.len())
}

/// Clears still missing before the next stage, `None` on the last stage.
pub fn clears_to_next_stage(clears: u32) -> Option<u32> {
    let stage = easy_stage_from_clears(clears);
    EASY_STAGE_THRESHOLDS
        .get(stage)
        .map(|&next| next.saturating_sub(clears))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_is_monotonic_and_clamped() {
        let mut prev = easy_stage_from_clears(0);
        assert_eq!(prev, 1);
        for clears in 0..500 {
            let s = easy_stage_from_clears(clears);
            assert!(s >= prev, "stage went backwards at {clears}");
            assert!((1..=EASY_STAGES.len()).contains(&s));
            prev = s;
        }
        assert_eq!(prev, 5);
    }

    #[test]
    fn stage_boundaries_follow_thresholds() {
        assert_eq!(easy_stage_from_clears(14), 1);
        assert_eq!(easy_stage_from_clears(15), 2);
        assert_eq!(easy_stage_from_clears(34), 2);
        assert_eq!(easy_stage_from_clears(35), 3);
        assert_eq!(easy_stage_from_clears(89), 4);
        assert_eq!(easy_stage_from_clears(90), 5);
    }

    #[test]
    fn next_stage_countdown() {
        assert_eq!(clears_to_next_stage(0), Some(15));
        assert_eq!(clears_to_next_stage(20), Some(15));
        assert_eq!(clears_to_next_stage(90), None);
    }
}
