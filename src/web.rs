//! Browser glue: `requestAnimationFrame` loop, the `TypingRush` JS class,
//! and a small canvas/DOM presentation mounted by `start_game()`.
//!
//! Nothing in here decides gameplay. The renderer reads snapshots and word
//! views from the session and forwards keyboard input back to it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use crate::clock::{Clock, PerformanceClock};
use crate::config::{Playfield, Tuning};
use crate::frames::FrameScheduler;
use crate::mode::Mode;
use crate::rng;
use crate::session::{Effect, FrameOutcome, GameSession, InputOutcome, Phase, Snapshot};
use crate::store::LocalStore;
use crate::word::WordView;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `FrameScheduler` backed by `window.requestAnimationFrame`.
pub struct RafFrames {
    callback: FrameCallback,
    handle: Option<i32>,
}

impl FrameScheduler for RafFrames {
    fn request_frame(&mut self) {
        let Some(win) = window() else { return };
        if let Some(cb) = self.callback.borrow().as_ref() {
            match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(handle) => self.handle = Some(handle),
                Err(err) => log::warn!("requestAnimationFrame failed: {err:?}"),
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let (Some(handle), Some(win)) = (self.handle.take(), window()) {
            let _ = win.cancel_animation_frame(handle);
        }
    }
}

// The callback closure dies with us; a queued frame must not outlive it.
impl Drop for RafFrames {
    fn drop(&mut self) {
        self.cancel_frame();
    }
}

pub type BrowserSession = GameSession<PerformanceClock, LocalStore, RafFrames>;

/// JS-facing handle to one game session.
#[wasm_bindgen]
pub struct TypingRush {
    session: Rc<RefCell<BrowserSession>>,
    view: Rc<RefCell<Option<CanvasView>>>,
}

#[wasm_bindgen]
impl TypingRush {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TypingRush {
        Self::build(Tuning::default())
    }

    /// Construct with a JSON tuning override, e.g. `{"starting_lives": 5}`.
    pub fn with_tuning(json: &str) -> Result<TypingRush, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(tuning))
    }

    pub fn start(&self) {
        self.session.borrow_mut().start();
    }

    /// Returns true when the game is paused afterwards.
    pub fn toggle_pause(&self) -> bool {
        self.session.borrow_mut().toggle_pause() == Phase::Paused
    }

    pub fn select_mode(&self, name: &str) -> Result<(), JsValue> {
        let mode: Mode = name.parse().map_err(to_js)?;
        self.session.borrow_mut().select_mode(mode).map_err(to_js)
    }

    /// Forward the full text box contents; true when a word was destroyed.
    pub fn handle_input(&self, text: &str) -> bool {
        matches!(self.session.borrow_mut().handle_input(text), InputOutcome::Destroyed { .. })
    }

    pub fn set_playfield(&self, width: f64, height: f64) {
        self.session.borrow_mut().set_playfield(Some(Playfield::new(width, height)));
    }

    /// Mark the playfield as not laid out; frames idle until it returns.
    pub fn clear_playfield(&self) {
        self.session.borrow_mut().set_playfield(None);
    }

    pub fn typed(&self) -> String {
        self.session.borrow().typed().to_string()
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.borrow().snapshot()).map_err(to_js)
    }

    pub fn words_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.borrow().words()).map_err(to_js)
    }

    pub fn drain_effects_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.borrow_mut().drain_effects()).map_err(to_js)
    }
}

impl TypingRush {
    fn build(tuning: Tuning) -> TypingRush {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let clock = PerformanceClock::new();
        let seed = rng::entropy_seed(clock.now_ms());
        let frames = RafFrames { callback: callback.clone(), handle: None };
        let session = Rc::new(RefCell::new(
            GameSession::new(clock, LocalStore, frames, seed).with_tuning(tuning),
        ));
        let view: Rc<RefCell<Option<CanvasView>>> = Rc::new(RefCell::new(None));

        // Weak handle: the session owns the callback through RafFrames.
        let weak: Weak<RefCell<BrowserSession>> = Rc::downgrade(&session);
        let frame_view = view.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            let Some(session) = weak.upgrade() else { return };
            let Ok(mut s) = session.try_borrow_mut() else {
                log::warn!("frame skipped: session busy");
                return;
            };
            let outcome = s.on_frame();
            if let Some(view) = frame_view.borrow_mut().as_mut() {
                view.frame(&mut s, outcome);
            }
        }) as Box<dyn FnMut(f64)>));

        TypingRush { session, view }
    }
}

impl Default for TypingRush {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// --- Mounted presentation ----------------------------------------------------

thread_local! {
    static GAME: RefCell<Option<TypingRush>> = const { RefCell::new(None) };
}

const CANVAS_ID: &str = "tr-canvas";
const HUD_ID: &str = "tr-hud";
const LIVES_ID: &str = "tr-lives";

/// Create the canvas, HUD and keyboard listener, then show the start screen.
pub fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(800);
        c.set_height(560);
        c.set_attribute("style", "display:block; margin:48px auto 0; border:1px solid #334155; border-radius:12px; background:#0f172a;").ok();
        body.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    ensure_overlay(&doc, HUD_ID, "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:14px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#e2e8f0; z-index:45;")?;
    ensure_overlay(&doc, LIVES_ID, "position:fixed; top:10px; right:12px; font-size:16px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; z-index:44;")?;

    let game = TypingRush::new();
    game.set_playfield(canvas.width() as f64, canvas.height() as f64);
    {
        let view = CanvasView::new(canvas, ctx, doc.clone());
        let s = game.session.borrow();
        view.draw(&s, PerformanceClock::new().now_ms());
        view.update_hud(&s.snapshot());
        *game.view.borrow_mut() = Some(view);
    }

    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow().as_ref() {
                on_key(game, &evt);
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();

    GAME.with(|cell| *cell.borrow_mut() = Some(game));
    log::info!("typing rush mounted");
    Ok(())
}

fn ensure_overlay(doc: &Document, id: &str, style: &str) -> Result<(), JsValue> {
    if doc.get_element_by_id(id).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(id);
            div.set_attribute("style", style).ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

fn on_key(game: &TypingRush, evt: &web_sys::KeyboardEvent) {
    let key = evt.key();
    let phase = game.session.borrow().phase();
    match key.as_str() {
        "Escape" => {
            evt.prevent_default();
            game.toggle_pause();
        }
        "Enter" if matches!(phase, Phase::NotStarted | Phase::GameOver) => game.start(),
        "Backspace" => {
            let mut typed = game.typed();
            typed.pop();
            game.handle_input(&typed);
        }
        "1" | "2" | "3" | "4" if matches!(phase, Phase::NotStarted | Phase::GameOver) => {
            let idx = key.as_bytes()[0] - b'1';
            if let Some(mode) = Mode::ALL.get(idx as usize) {
                let _ = game.session.borrow_mut().select_mode(*mode);
            }
        }
        _ => {
            let mut chars = key.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c.is_ascii_alphabetic() || c == ' ' {
                    if c == ' ' {
                        evt.prevent_default();
                    }
                    let mut typed = game.typed();
                    typed.push(c);
                    game.handle_input(&typed);
                }
            }
        }
    }
    // Menu / pause screens are not redrawn by the frame loop.
    if let Some(view) = game.view.borrow_mut().as_mut() {
        let s = game.session.borrow();
        view.draw(&s, PerformanceClock::new().now_ms());
        view.update_hud(&s.snapshot());
    }
}

struct Burst {
    x: f64,
    y: f64,
    until_ms: f64,
}

/// Canvas renderer plus DOM HUD.
struct CanvasView {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    doc: Document,
    bursts: Vec<Burst>,
    flash_until_ms: f64,
    flash_color: &'static str,
}

impl CanvasView {
    fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, doc: Document) -> Self {
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        Self { canvas, ctx, doc, bursts: Vec::new(), flash_until_ms: 0.0, flash_color: "" }
    }

    fn frame(&mut self, session: &mut BrowserSession, outcome: FrameOutcome) {
        let now = PerformanceClock::new().now_ms();
        for effect in session.drain_effects() {
            match effect {
                Effect::Burst { x, y, until_ms } => self.bursts.push(Burst { x, y, until_ms }),
                Effect::SmallCelebration => self.flash(now + 350.0, "rgba(251,113,133,0.18)"),
                Effect::LargeCelebration => self.flash(now + 900.0, "rgba(250,204,21,0.22)"),
            }
        }
        self.bursts.retain(|b| b.until_ms > now);
        if outcome == FrameOutcome::Ignored {
            return;
        }
        self.draw(session, now);
        if matches!(outcome, FrameOutcome::Advanced { notify: true } | FrameOutcome::GameOver) {
            self.update_hud(&session.snapshot());
        }
    }

    fn flash(&mut self, until_ms: f64, color: &'static str) {
        self.flash_until_ms = until_ms;
        self.flash_color = color;
    }

    fn draw(&self, session: &BrowserSession, now: f64) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let ctx = &self.ctx;
        let snap = session.snapshot();

        ctx.set_fill_style_str("#0f172a");
        ctx.fill_rect(0.0, 0.0, w, h);
        if snap.slow_motion_active {
            ctx.set_fill_style_str("rgba(34,211,238,0.06)");
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        if now < self.flash_until_ms {
            ctx.set_fill_style_str(self.flash_color);
            ctx.fill_rect(0.0, 0.0, w, h);
        }

        // floor line
        let floor = h - session.tuning().floor_margin;
        ctx.set_fill_style_str("rgba(129,140,248,0.6)");
        ctx.fill_rect(0.0, floor, w, 3.0);

        ctx.set_font("16px 'Fira Code', monospace");
        for word in session.words() {
            self.draw_word(&word, w);
        }

        for b in &self.bursts {
            let life = ((b.until_ms - now) / 450.0).clamp(0.0, 1.0);
            let r = 12.0 + (1.0 - life) * 18.0;
            ctx.set_fill_style_str(&format!("rgba(196,181,253,{:.2})", life * 0.8));
            ctx.begin_path();
            let _ = ctx.arc(b.x / 100.0 * w, b.y + 12.0, r, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }

        match session.phase() {
            Phase::NotStarted => self.overlay(&snap, "Typing Rush", "Enter to start, 1-4 picks a mode"),
            Phase::Paused => self.overlay(&snap, "Paused", "Esc to resume"),
            Phase::GameOver => self.overlay(&snap, "Game Over", "Enter to play again"),
            Phase::Running => {}
        }
    }

    fn draw_word(&self, word: &WordView, field_w: f64) {
        let ctx = &self.ctx;
        const CHAR_W: f64 = 9.6;
        let label_w = word.text.len() as f64 * CHAR_W + if word.power.is_some() { 64.0 } else { 24.0 };
        let left = word.x / 100.0 * field_w - label_w / 2.0;
        let top = word.y;

        ctx.set_fill_style_str(if word.power.is_some() { "#fde68a" } else { "#e2e8f0" });
        ctx.fill_rect(left, top, label_w, 26.0);
        if word.selected {
            ctx.set_stroke_style_str("#818cf8");
            ctx.set_line_width(2.0);
            ctx.stroke_rect(left - 1.0, top - 1.0, label_w + 2.0, 28.0);
        }

        let (head, tail) = word.text.split_at(word.typed_len.min(word.text.len()));
        let text_x = left + 12.0;
        ctx.set_fill_style_str("#64748b");
        ctx.fill_text(head, text_x, top + 5.0).ok();
        ctx.set_fill_style_str("#0f172a");
        ctx.fill_text(tail, text_x + head.len() as f64 * CHAR_W, top + 5.0).ok();

        if let Some(power) = word.power {
            ctx.set_fill_style_str("#78350f");
            ctx.fill_text(power.badge(), text_x + word.text.len() as f64 * CHAR_W + 8.0, top + 5.0).ok();
        }
    }

    fn overlay(&self, snap: &Snapshot, title: &str, hint: &str) {
        let ctx = &self.ctx;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        ctx.set_fill_style_str("rgba(2,6,23,0.7)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_text_align("center");
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("bold 36px sans-serif");
        ctx.fill_text(title, w / 2.0, h / 2.0 - 60.0).ok();
        ctx.set_font("16px 'Fira Code', monospace");
        ctx.set_fill_style_str("#cbd5e1");
        ctx.fill_text(hint, w / 2.0, h / 2.0).ok();
        let best = format!("Mode: {}  Best: {}", snap.mode_label, snap.current_high);
        ctx.fill_text(&best, w / 2.0, h / 2.0 + 28.0).ok();
        if snap.game_over {
            ctx.fill_text(&format!("Score: {}", snap.score), w / 2.0, h / 2.0 + 56.0).ok();
        }
        ctx.set_text_align("left");
    }

    fn update_hud(&self, snap: &Snapshot) {
        if let Some(el) = self.doc.get_element_by_id(HUD_ID) {
            let mut text = format!(
                "Score: {}  Combo: x{}  High ({}): {}{}",
                snap.score,
                snap.combo,
                snap.mode_label,
                snap.current_high,
                if snap.new_high { " NEW" } else { "" }
            );
            if let Some(stage) = snap.current_stage {
                text.push_str(&format!("  Stage {stage}"));
                if let Some(left) = snap.clears_to_next_stage.filter(|n| *n > 0) {
                    text.push_str(&format!(" (+{left} clears)"));
                }
            }
            if !snap.typed.is_empty() {
                text.push_str(&format!("  > {}", snap.typed));
            }
            el.set_text_content(Some(&text));
        }
        if let Some(el) = self.doc.get_element_by_id(LIVES_ID) {
            let total = snap.lives.max(3) as usize;
            let filled = snap.lives.max(0) as usize;
            let mut html = String::new();
            for i in 0..total {
                let color = if i < filled { "#ff4d4d" } else { "#6b6b6b" };
                let glyph = if i < filled { "♥" } else { "♡" };
                html.push_str(&format!("<span style='color:{color};margin-right:6px;'>{glyph}</span>"));
            }
            el.set_inner_html(&html);
        }
    }
}
