//! Neon Arcade core crate.
//!
//! Four canvas mini-games behind one entrypoint: a pseudo-3D highway
//! cruise, Snake, a Pac-Man style maze chase and a five-letter password
//! puzzle. `start_game("drive")` (or `"snake"`, `"pacman"`, `"wordle"`)
//! boots a cabinet on a shared canvas and `stop_game()` tears it down
//! again. Game logic never touches browser types, so the simulations also
//! run natively under plain `cargo test`.

use wasm_bindgen::prelude::*;

pub mod drive;
pub mod input;
pub mod pacman;
pub mod rng;
mod runtime;
pub mod snake;
pub mod wordle;

pub use runtime::{GameSummary, Phase};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Boots the named game, replacing any game already running.
#[wasm_bindgen]
pub fn start_game(name: &str) -> Result<(), JsValue> {
    match runtime::GameKind::from_name(name) {
        Some(kind) => runtime::start(kind),
        None => Err(JsValue::from_str(&format!("unknown game: {name}"))),
    }
}

#[wasm_bindgen]
pub fn start_drive() -> Result<(), JsValue> {
    runtime::start(runtime::GameKind::Drive)
}

#[wasm_bindgen]
pub fn start_snake() -> Result<(), JsValue> {
    runtime::start(runtime::GameKind::Snake)
}

#[wasm_bindgen]
pub fn start_pacman() -> Result<(), JsValue> {
    runtime::start(runtime::GameKind::Pacman)
}

#[wasm_bindgen]
pub fn start_wordle() -> Result<(), JsValue> {
    runtime::start(runtime::GameKind::Wordle)
}

/// Stops the running game and blanks the canvas. Safe to call repeatedly.
#[wasm_bindgen]
pub fn stop_game() {
    runtime::stop();
}

/// JSON snapshot of the running game (`game`, `score`, `state`), or
/// `None` when nothing is running.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_summary() -> Option<String> {
    runtime::summary().and_then(|s| serde_json::to_string(&s).ok())
}
