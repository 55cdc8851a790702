//! Frog Crossing core crate.
//!
//! A vocabulary quiz where a frog crosses a river one lily pad at a time: each
//! round shows an English word and up to four translations. Level mode clears
//! a unit after a fixed number of correct answers; endless mode draws from
//! every unit until the first mistake.
//!
//! The quiz logic (`catalog`, `session`, `round`, `controller`, `navigation`)
//! is plain Rust and runs natively under `cargo test`; `web` is the browser
//! front end driven through [`start_game`].

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod round;
pub mod session;
mod web;

pub use catalog::{Catalog, UnitSummary, VocabularyUnit, WordEntry};
pub use config::GameConfig;
pub use controller::{AnswerFeedback, SessionController};
pub use error::{CatalogError, SessionError};
pub use navigation::{Frame, Intent, Navigator, Screen};
pub use session::{
    AnswerOption, Difficulty, Mode, OPTION_COUNT, POINTS_PER_CORRECT, ProgressSnapshot,
    RoundSnapshot, SessionOutcome, SessionState, StepTarget,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Entrypoint called by the host page once the module is loaded.
///
/// `config_json` is an optional partial [`GameConfig`] object. The returned
/// promise rejects when the word catalog cannot be loaded.
#[wasm_bindgen]
pub async fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    let config = GameConfig::from_json(config_json.as_deref());
    web::run(config).await
}
