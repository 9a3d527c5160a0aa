//! Typing Rush core crate.
//!
//! Words fall down a playfield and the player types them before they cross
//! the floor. The gameplay core (`session`) is plain Rust driven through
//! injected clock / frame / storage seams so it runs natively under
//! `cargo test`; `web` wires it to the browser via wasm-bindgen.

use wasm_bindgen::prelude::*;

pub mod clock;
pub mod config;
pub mod error;
pub mod frames;
pub mod generator;
pub mod mode;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod store;
pub mod web;
pub mod word;
pub mod words;

pub use clock::{Clock, ManualClock, PerformanceClock};
pub use config::{HIGH_SCORES_KEY, Playfield, Tuning};
pub use error::{SessionError, StoreError};
pub use frames::{FrameScheduler, ManualFrames};
pub use mode::Mode;
pub use session::{Effect, FrameOutcome, GameSession, InputOutcome, Phase, Snapshot};
pub use store::{HighScores, KeyValueStore, LocalStore, MemoryStore};
pub use web::TypingRush;
pub use word::{PowerKind, WordId, WordView};
pub use words::easy_stage_from_clears;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Mount the canvas game into the page (start screen; Enter begins a run).
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount()
}
