//! A single game session: run state, the per-frame simulation step, the
//! input matcher and the scoring / power engine.
//!
//! The session never talks to the browser directly. Time comes from a
//! [`Clock`], frames are requested through a [`FrameScheduler`] and high
//! scores go through a [`KeyValueStore`], so the whole loop can be stepped
//! by hand in tests.
//!
//! Phases: `NotStarted -> Running <-> Paused`, `Running -> GameOver` once
//! lives hit zero, and `start()` from any phase begins a fresh run. Only
//! `Running` advances the simulation.

use serde::Serialize;

use crate::clock::Clock;
use crate::config::{Playfield, Tuning};
use crate::error::SessionError;
use crate::frames::FrameScheduler;
use crate::generator;
use crate::mode::Mode;
use crate::rng::{self, GameRng};
use crate::scoring;
use crate::spawner::{self, Spawner};
use crate::store::{HighScores, KeyValueStore};
use crate::word::{PowerKind, Word, WordId, WordView};
use crate::words::{clears_to_next_stage, easy_stage_from_clears};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Fire-and-forget signals for the effects layer (confetti, particles).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Effect {
    /// Extra life collected.
    SmallCelebration,
    /// Mode high score beaten (once per run, and again at game over).
    LargeCelebration,
    /// A word was destroyed at this spot.
    Burst { x: f64, y: f64, until_ms: f64 },
}

/// What a call to [`GameSession::on_frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Stale callback or not running; nothing touched.
    Ignored,
    /// No playfield layout yet; rescheduled without advancing.
    Deferred,
    /// Simulation stepped. `notify` is the throttled re-render hint.
    Advanced { notify: bool },
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not running; the typed buffer was left alone.
    Ignored,
    Typing { selected: Option<WordId> },
    Destroyed { id: WordId, gained: u64 },
}

/// Read-only state for the HUD.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub score: u64,
    pub lives: i32,
    pub combo: u32,
    pub paused: bool,
    pub started: bool,
    pub game_over: bool,
    pub slow_motion_active: bool,
    pub mode: Mode,
    pub mode_label: &'static str,
    pub current_stage: Option<usize>,
    pub clears_to_next_stage: Option<u32>,
    pub high_scores: HighScores,
    pub current_high: u64,
    pub new_high: bool,
    pub typed: String,
}

pub struct GameSession<C, K, F> {
    clock: C,
    store: K,
    frames: F,
    rng: GameRng,
    tuning: Tuning,
    playfield: Option<Playfield>,

    phase: Phase,
    mode: Mode,
    score: u64,
    lives: i32,
    combo: u32,
    cleared: u32,
    slow_until_ms: f64,
    paused_at_ms: f64,
    high_scores: HighScores,
    celebrated: bool,

    elapsed_secs: f64,
    last_frame_ms: Option<f64>,
    render_accumulator: f64,
    frame_pending: bool,

    spawner: Spawner,
    words: Vec<Word>,
    next_id: u64,
    selected: Option<WordId>,
    typed: String,
    effects: Vec<Effect>,
}

impl<C: Clock, K: KeyValueStore, F: FrameScheduler> GameSession<C, K, F> {
    pub fn new(clock: C, store: K, frames: F, seed: u64) -> Self {
        let high_scores = HighScores::load(&store);
        let tuning = Tuning::default();
        Self {
            clock,
            store,
            frames,
            rng: rng::seeded(seed),
            lives: tuning.starting_lives,
            tuning,
            playfield: Some(Playfield::default()),
            phase: Phase::NotStarted,
            mode: Mode::default(),
            score: 0,
            combo: 0,
            cleared: 0,
            slow_until_ms: 0.0,
            paused_at_ms: 0.0,
            high_scores,
            celebrated: false,
            elapsed_secs: 0.0,
            last_frame_ms: None,
            render_accumulator: 0.0,
            frame_pending: false,
            spawner: Spawner::new(),
            words: Vec::new(),
            next_id: 0,
            selected: None,
            typed: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        if self.phase == Phase::NotStarted {
            self.lives = tuning.starting_lives;
        }
        self.tuning = tuning;
        self
    }

    // --- Lifecycle ----------------------------------------------------------

    /// Begin a fresh run (also used for restart).
    pub fn start(&mut self) {
        // A frame queued for the previous run must not touch the new one.
        self.cancel_frame();

        self.phase = Phase::Running;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.combo = 0;
        self.cleared = 0;
        self.slow_until_ms = 0.0;
        self.paused_at_ms = 0.0;
        self.celebrated = false;
        self.elapsed_secs = 0.0;
        self.last_frame_ms = None;
        self.render_accumulator = 0.0;
        self.spawner = Spawner::new();
        self.words.clear();
        self.selected = None;
        self.typed.clear();
        self.effects.clear();

        log::info!("run started in {} mode", self.mode);
        self.request_frame();
    }

    /// Pause a running game or resume a paused one. Returns the new phase.
    pub fn toggle_pause(&mut self) -> Phase {
        let now = self.clock.now_ms();
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.paused_at_ms = now;
                self.cancel_frame();
            }
            Phase::Paused => {
                // Slow-motion must not drain while paused.
                self.slow_until_ms += now - self.paused_at_ms;
                self.phase = Phase::Running;
                self.last_frame_ms = None;
                self.request_frame();
            }
            Phase::NotStarted | Phase::GameOver => {}
        }
        self.phase
    }

    /// Change difficulty; only between runs.
    pub fn select_mode(&mut self, mode: Mode) -> Result<(), SessionError> {
        match self.phase {
            Phase::Running | Phase::Paused => Err(SessionError::ModeLocked),
            Phase::NotStarted | Phase::GameOver => {
                self.mode = mode;
                Ok(())
            }
        }
    }

    /// Layout size of the playfield, or `None` while it is not laid out.
    pub fn set_playfield(&mut self, field: Option<Playfield>) {
        self.playfield = field;
    }

    // --- Simulation loop ----------------------------------------------------

    /// One animation frame.
    pub fn on_frame(&mut self) -> FrameOutcome {
        if !self.frame_pending || self.phase != Phase::Running {
            return FrameOutcome::Ignored;
        }
        self.frame_pending = false;

        let Some(field) = self.playfield else {
            self.last_frame_ms = None;
            self.request_frame();
            return FrameOutcome::Deferred;
        };

        let now = self.clock.now_ms();
        let dt = self
            .last_frame_ms
            .map(|last| ((now - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now);
        self.elapsed_secs += dt;

        let slow = self.slow_motion_active_at(now);
        let interval = spawner::spawn_interval(self.elapsed_secs, self.mode, slow, &self.tuning);
        if self.spawner.advance(dt, interval) {
            self.spawn_word(field, now);
        }

        let rate = spawner::fall_rate(self.elapsed_secs, self.mode, slow, &self.tuning);
        for w in &mut self.words {
            w.y += w.speed * rate * dt;
        }

        let floor = field.height - self.tuning.floor_margin;
        let before = self.words.len();
        self.words.retain(|w| w.y < floor);
        let missed = before - self.words.len();
        if missed > 0 {
            self.register_misses(missed);
        }

        if self.lives <= 0 {
            self.finish_run();
            return FrameOutcome::GameOver;
        }

        self.render_accumulator += dt;
        let notify = self.render_accumulator >= 1.0 / self.tuning.notify_hz;
        if notify {
            self.render_accumulator = 0.0;
        }

        self.request_frame();
        FrameOutcome::Advanced { notify }
    }

    fn register_misses(&mut self, missed: usize) {
        let missed = i32::try_from(missed).unwrap_or(i32::MAX);
        self.lives = self.lives.saturating_sub(missed).max(0);
        self.combo = 0;
        self.typed.clear();
        self.selected = None;
        log::debug!("{missed} word(s) hit the floor, {} lives left", self.lives);
    }

    fn finish_run(&mut self) {
        self.phase = Phase::GameOver;
        self.cancel_frame();
        self.typed.clear();
        self.selected = None;

        if self.high_scores.record(self.mode, self.score) {
            if let Err(err) = self.high_scores.save(&mut self.store) {
                log::warn!("could not persist high scores: {err}");
            }
            self.effects.push(Effect::LargeCelebration);
            log::info!("game over: new {} high score {}", self.mode, self.score);
        } else {
            log::info!("game over: score {}", self.score);
        }
    }

    fn spawn_word(&mut self, field: Playfield, now: f64) -> WordId {
        let power = self.spawner.register_spawn(&mut self.rng, &self.tuning);
        let text = match power {
            Some(kind) => {
                log::debug!("power word {kind:?} on spawn #{}", self.spawner.total());
                kind.text().to_string()
            }
            None => {
                let stage = self.stage();
                generator::generate(&mut self.rng, self.mode, self.elapsed_secs, stage)
            }
        };
        let x = spawner::placement(&mut self.rng, text.chars().count(), field.width);
        let speed = spawner::fall_speed(&mut self.rng, self.elapsed_secs);

        self.next_id += 1;
        let id = WordId(self.next_id);
        self.words.push(Word {
            id,
            text,
            power,
            x,
            y: self.tuning.spawn_y,
            speed,
            spawned_at_ms: now,
        });
        id
    }

    // --- Input matcher ------------------------------------------------------

    /// Feed the full contents of the text input.
    pub fn handle_input(&mut self, raw: &str) -> InputOutcome {
        if self.phase != Phase::Running {
            return InputOutcome::Ignored;
        }
        self.typed = raw.chars().filter(|c| c.is_ascii_alphabetic() || *c == ' ').collect();
        if self.typed.is_empty() {
            self.selected = None;
            return InputOutcome::Typing { selected: None };
        }

        let lower = self.typed.to_ascii_lowercase();
        let target = self
            .words
            .iter()
            .filter(|w| w.matches_prefix(&lower))
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|w| (w.id, w.text.eq_ignore_ascii_case(&lower)));

        match target {
            None => {
                self.selected = None;
                InputOutcome::Typing { selected: None }
            }
            Some((id, true)) => {
                let gained = self.destroy(id);
                self.typed.clear();
                InputOutcome::Destroyed { id, gained }
            }
            Some((id, false)) => {
                self.selected = Some(id);
                InputOutcome::Typing { selected: Some(id) }
            }
        }
    }

    // --- Scoring / power engine ---------------------------------------------

    fn destroy(&mut self, id: WordId) -> u64 {
        let Some(idx) = self.words.iter().position(|w| w.id == id) else {
            return 0;
        };
        let word = self.words.remove(idx);
        self.selected = None;

        let now = self.clock.now_ms();
        self.effects.push(Effect::Burst { x: word.x, y: word.y, until_ms: now + self.tuning.burst_ms });
        self.cleared += 1;
        self.combo += 1;

        let mut gained = scoring::word_score(&word.text, self.combo);
        match word.power {
            Some(PowerKind::Slow) => {
                self.slow_until_ms =
                    scoring::extend_slow_motion(self.slow_until_ms, now, self.tuning.slow_duration_ms);
            }
            Some(PowerKind::ExtraLife) => {
                self.lives += 1;
                gained += self.tuning.extra_life_bonus;
                self.effects.push(Effect::SmallCelebration);
            }
            None => {}
        }
        self.score += gained;

        if self.score > self.high_scores.get(self.mode) && !self.celebrated {
            self.celebrated = true;
            self.effects.push(Effect::LargeCelebration);
        }
        gained
    }

    // --- Frame bookkeeping --------------------------------------------------

    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.frames.request_frame();
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
        self.frames.cancel_frame();
    }

    // --- Read side ----------------------------------------------------------

    fn slow_motion_active_at(&self, now: f64) -> bool {
        now < self.slow_until_ms
    }

    /// Frozen along with the remaining time while paused.
    pub fn slow_motion_active(&self) -> bool {
        self.slow_motion_remaining_ms() > 0.0
    }

    /// Slow-motion left, measured on the clock (0 when inactive).
    pub fn slow_motion_remaining_ms(&self) -> f64 {
        let now = match self.phase {
            Phase::Paused => self.paused_at_ms,
            _ => self.clock.now_ms(),
        };
        (self.slow_until_ms - now).max(0.0)
    }

    /// Easy-mode stage; 1 elsewhere so generation always has a pool.
    fn stage(&self) -> usize {
        easy_stage_from_clears(self.cleared)
    }

    pub fn snapshot(&self) -> Snapshot {
        let easy = self.mode == Mode::Easy;
        Snapshot {
            score: self.score,
            lives: self.lives,
            combo: self.combo,
            paused: self.phase == Phase::Paused,
            started: matches!(self.phase, Phase::Running | Phase::Paused),
            game_over: self.phase == Phase::GameOver,
            slow_motion_active: self.slow_motion_active(),
            mode: self.mode,
            mode_label: self.mode.label(),
            current_stage: easy.then(|| self.stage()),
            clears_to_next_stage: if easy { clears_to_next_stage(self.cleared) } else { None },
            high_scores: self.high_scores,
            current_high: self.high_scores.get(self.mode),
            new_high: self.celebrated,
            typed: self.typed.clone(),
        }
    }

    pub fn words(&self) -> Vec<WordView> {
        self.words
            .iter()
            .map(|w| {
                let selected = self.selected == Some(w.id);
                WordView {
                    id: w.id,
                    text: w.text.clone(),
                    x: w.x,
                    y: w.y,
                    power: w.power,
                    selected,
                    typed_len: if selected { self.typed.len().min(w.text.len()) } else { 0 },
                }
            })
            .collect()
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn selected(&self) -> Option<WordId> {
        self.selected
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn spawn_count(&self) -> u64 {
        self.spawner.total()
    }

    pub fn high_scores(&self) -> HighScores {
        self.high_scores
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn playfield(&self) -> Option<Playfield> {
        self.playfield
    }
}
