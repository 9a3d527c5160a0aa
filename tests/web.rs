// Browser smoke tests for the JS-facing handle.
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use typing_rush::TypingRush;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn handle_starts_and_reports_snapshot() {
    let game = TypingRush::with_tuning(r#"{"starting_lives": 5}"#).unwrap();
    game.select_mode("hard").unwrap();
    game.start();

    let snap: serde_json::Value = serde_json::from_str(&game.snapshot_json().unwrap()).unwrap();
    assert_eq!(snap["started"], true);
    assert_eq!(snap["lives"], 5);
    assert_eq!(snap["mode"], "hard");
    assert!(game.select_mode("easy").is_err());
}

#[wasm_bindgen_test]
fn pause_and_typing_round_trip() {
    let game = TypingRush::new();
    game.start();
    assert!(!game.handle_input("zz9"));
    assert_eq!(game.typed(), "zz");
    assert!(game.toggle_pause());
    assert!(!game.toggle_pause());
    assert_eq!(game.words_json().unwrap(), "[]");
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(win) = web_sys::window() {
            let _ = win.request_animation_frame(&resolve);
        }
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn dropping_a_running_game_cancels_its_frame() {
    let win = web_sys::window().unwrap();
    let errors = Rc::new(Cell::new(0u32));
    let seen = errors.clone();
    let on_error = Closure::wrap(Box::new(move |_evt: JsValue| {
        seen.set(seen.get() + 1);
    }) as Box<dyn FnMut(JsValue)>);
    win.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let game = TypingRush::new();
    game.start();
    drop(game);
    next_frame().await;
    next_frame().await;

    win.set_onerror(None);
    assert_eq!(errors.get(), 0);
}
