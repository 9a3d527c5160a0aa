//! Spawn timing, power cadence, placement and fall speed.

use rand::Rng;

use crate::config::Tuning;
use crate::mode::Mode;
use crate::rng::uniform;
use crate::word::PowerKind;

/// Pacing multiplier in `[1, 2.2]` ramping over the first two minutes.
pub fn hardness_factor(elapsed_secs: f64) -> f64 {
    1.0 + (elapsed_secs.max(0.0) / 120.0).min(1.2)
}

/// Seconds between spawns at `elapsed_secs` for `mode`.
pub fn spawn_interval(elapsed_secs: f64, mode: Mode, slow_active: bool, tuning: &Tuning) -> f64 {
    let base = (1.2 / hardness_factor(elapsed_secs)).clamp(0.35, 2.0);
    let stretch = if slow_active { tuning.slow_spawn_stretch } else { 1.0 };
    base / mode.desc().spawn_rate_mul * stretch
}

/// Fall rate in px/s shared by all words this tick (before per-word speed).
pub fn fall_rate(elapsed_secs: f64, mode: Mode, slow_active: bool, tuning: &Tuning) -> f64 {
    let slow = if slow_active { tuning.slow_fall_factor } else { 1.0 };
    tuning.base_fall_rate * hardness_factor(elapsed_secs) * mode.desc().speed_mul * slow
}

/// Per-word speed multiplier: random base plus a time-driven bump.
pub fn fall_speed<R: Rng + ?Sized>(rng: &mut R, elapsed_secs: f64) -> f64 {
    let bump = (0.2 + elapsed_secs / 80.0).clamp(0.0, 1.2);
    uniform(rng, 0.9, 1.2) + bump
}

const PAD_PX: f64 = 24.0;
const EM_PX: f64 = 16.0;

/// Horizontal anchor (percent of width) keeping the label inside the field.
pub fn placement<R: Rng + ?Sized>(rng: &mut R, text_len: usize, width: f64) -> f64 {
    let width_em = (text_len as f64 * 0.6).clamp(2.5, 16.0);
    let right_pad = PAD_PX + width_em * EM_PX;
    let x = uniform(rng, PAD_PX, (width - right_pad).max(PAD_PX + 1.0));
    x / width.max(1.0) * 100.0
}

/// Spawn accumulator and the "every Nth spawn is a power" counter.
#[derive(Debug, Default, Clone)]
pub struct Spawner {
    accumulator: f64,
    since_power: u32,
    total: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `dt`; returns true (and resets) once `interval` is reached.
    pub fn advance(&mut self, dt: f64, interval: f64) -> bool {
        self.accumulator += dt;
        if self.accumulator >= interval {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    /// Count a spawn; returns the forced power kind when the cadence is hit.
    pub fn register_spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> Option<PowerKind> {
        self.total += 1;
        self.since_power += 1;
        if self.since_power >= tuning.power_cadence.max(1) {
            self.since_power = 0;
            Some(pick_power(rng, tuning))
        } else {
            None
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Weighted draw between the power kinds.
pub fn pick_power<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> PowerKind {
    let total = tuning.slow_weight + tuning.extra_life_weight;
    if total == 0 {
        return PowerKind::Slow;
    }
    if rng.gen_range(0..total) < tuning.slow_weight {
        PowerKind::Slow
    } else {
        PowerKind::ExtraLife
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn hardness_factor_range() {
        assert!((hardness_factor(0.0) - 1.0).abs() < 1e-9);
        assert!((hardness_factor(60.0) - 1.5).abs() < 1e-9);
        assert!((hardness_factor(10_000.0) - 2.2).abs() < 1e-9);
    }

    #[test]
    fn interval_is_clamped_then_scaled() {
        let t = Tuning::default();
        assert!((spawn_interval(0.0, Mode::Medium, false, &t) - 1.2).abs() < 1e-9);
        assert!((spawn_interval(0.0, Mode::Medium, true, &t) - 3.6).abs() < 1e-9);
        let late = spawn_interval(1_000.0, Mode::Extreme, false, &t);
        assert!((late - (1.2 / 2.2) / 1.35).abs() < 1e-9);
    }

    #[test]
    fn slow_motion_cuts_fall_rate() {
        let t = Tuning::default();
        let normal = fall_rate(0.0, Mode::Medium, false, &t);
        let slow = fall_rate(0.0, Mode::Medium, true, &t);
        assert!((normal - 60.0).abs() < 1e-9);
        assert!((slow - 12.0).abs() < 1e-9);
    }

    #[test]
    fn every_fifteenth_spawn_is_power() {
        let t = Tuning::default();
        let mut rng = seeded(9);
        let mut s = Spawner::new();
        for i in 1..=90u32 {
            let power = s.register_spawn(&mut rng, &t);
            assert_eq!(power.is_some(), i % 15 == 0, "spawn #{i}");
        }
        assert_eq!(s.total(), 90);
    }

    #[test]
    fn power_draw_is_weighted() {
        let t = Tuning::default();
        let mut rng = seeded(21);
        let slow = (0..10_000)
            .filter(|_| pick_power(&mut rng, &t) == PowerKind::Slow)
            .count();
        assert!((5_500..6_500).contains(&slow), "slow drawn {slow} times");
    }

    #[test]
    fn placement_stays_in_field() {
        let mut rng = seeded(4);
        for len in [1usize, 5, 12, 40] {
            for _ in 0..200 {
                let pct = placement(&mut rng, len, 800.0);
                assert!(pct >= 3.0 && pct <= 100.0, "len {len} -> {pct}");
            }
        }
    }

    #[test]
    fn fall_speed_bump_caps() {
        let mut rng = seeded(8);
        for _ in 0..200 {
            let early = fall_speed(&mut rng, 0.0);
            assert!((1.1..1.4).contains(&early));
            let late = fall_speed(&mut rng, 10_000.0);
            assert!((2.1..2.4).contains(&late));
        }
    }

    #[test]
    fn accumulator_fires_and_resets() {
        let mut s = Spawner::new();
        assert!(!s.advance(0.5, 1.0));
        assert!(s.advance(0.5, 1.0));
        assert!(!s.advance(0.9, 1.0));
    }
}
