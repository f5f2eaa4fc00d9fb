use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod game;
pub mod types;

pub use board::BoardState;
pub use game::{GameConfig, GameError, GameInstance};
pub use types::{MoveResult, Player, Position, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
