//! Snack Drop core crate.
//!
//! A small canvas arcade game: steer a paddle left / right to catch falling
//! food before the countdown timer runs out. Each catch scores a point and
//! restores some time. The simulation core (`game::sim`) is pure Rust and
//! tested natively; the wasm layer wires it to a canvas, the keyboard and a
//! requestAnimationFrame loop.

use wasm_bindgen::prelude::*;

pub mod game;

pub use game::sim::FOOD_KINDS;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Unified entrypoint: set up the canvas, listeners and the frame loop.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start()
}
