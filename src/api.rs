//! JS-facing entry points. The presentation layer drives one game at a time
//! through these functions and receives plain serialized objects back.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{GameConfig, GameError, GameInstance, TurnReport};
use crate::types::{GameResult, GameView, Position};

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| Mutex::new(Session::default()));

/// Holds the game the exported functions operate on.
#[derive(Default)]
pub struct Session {
    game: Option<GameInstance>,
}

impl Session {
    pub fn start(&mut self, config: GameConfig) -> GameView {
        let game = GameInstance::new(config);
        let view = game.to_game_view();
        self.game = Some(game);
        view
    }

    pub fn state(&self) -> Result<GameView, GameError> {
        Ok(self.game()?.to_game_view())
    }

    pub fn legal_moves(&self) -> Result<Vec<Position>, GameError> {
        Ok(self.game()?.legal_moves())
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<TurnReport, GameError> {
        self.game_mut()?.place_at(row, col)
    }

    pub fn ai_move(&mut self) -> Result<TurnReport, GameError> {
        self.game_mut()?.do_ai_move()
    }

    /// `Ok(None)` while the game is still running.
    pub fn result(&self) -> Result<Option<GameResult>, GameError> {
        Ok(self.game()?.to_game_result())
    }

    pub fn restart(&mut self) -> Result<GameView, GameError> {
        let game = self.game_mut()?;
        game.restart();
        Ok(game.to_game_view())
    }

    fn game(&self) -> Result<&GameInstance, GameError> {
        self.game.as_ref().ok_or(GameError::NoActiveGame)
    }

    fn game_mut(&mut self) -> Result<&mut GameInstance, GameError> {
        self.game.as_mut().ok_or(GameError::NoActiveGame)
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, GameError>) -> Result<T, GameError> {
    let mut session = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut session)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

/// Starts a new game. `config` may be `undefined`/`null` for defaults.
#[wasm_bindgen]
pub fn start_game(config: JsValue) -> Result<JsValue, JsError> {
    let config: GameConfig = if config.is_undefined() || config.is_null() {
        GameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let view = with_session(|session| Ok(session.start(config)))?;
    to_js(&view)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsError> {
    to_js(&with_session(|session| session.state())?)
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsError> {
    to_js(&with_session(|session| session.legal_moves())?)
}

#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsError> {
    to_js(&with_session(|session| session.place(row, col))?)
}

#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsError> {
    to_js(&with_session(|session| session.ai_move())?)
}

#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsError> {
    to_js(&with_session(|session| session.result())?)
}

#[wasm_bindgen]
pub fn restart_game() -> Result<JsValue, JsError> {
    to_js(&with_session(|session| session.restart())?)
}
