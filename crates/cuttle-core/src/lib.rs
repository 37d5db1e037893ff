#![deny(warnings)]
pub mod errors;
pub mod executor;
pub mod game;
pub mod generator;
pub mod model;
pub mod moves;

pub use errors::CoreError;
pub use executor::{execute, SEVEN_REVEAL_COUNT};
pub use generator::legal_moves;
pub use model::game_state::GameState;
pub use moves::Move;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "cuttle-core"
    }

    pub const fn codename() -> &'static str {
        "Rust Remaster"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

/// Deals a fresh start state; the crate-level entry point named in §6.
pub fn initial_state(seed: Option<u64>) -> GameState {
    GameState::initial(seed)
}
