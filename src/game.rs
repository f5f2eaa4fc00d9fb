use serde::{Deserialize, Serialize};

use crate::ai::search::{DEFAULT_DEPTH, Searcher, greedy_move};
use crate::board::BoardState;
use crate::types::{GameResult, GameView, MoveResult, Player, Position, Winner};

/// Errors raised by the game loop and the boundary API.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move at {0}")]
    IllegalMove(Position),

    #[error("position out of bounds: ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("{0} has no legal moves")]
    NoLegalMove(Player),

    #[error("move selector chose an illegal move at {0}")]
    SelectorReturnedIllegal(Position),

    #[error("no game has been started")]
    NoActiveGame,
}

/// Chooses a move for `player` on a read-only snapshot.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, state: &BoardState, player: Player) -> Option<Position>;
}

/// Maximizes immediate flips.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, state: &BoardState, _player: Player) -> Option<Position> {
        greedy_move(state)
    }
}

/// Plain minimax to a fixed depth.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector {
    pub depth: u32,
}

impl Default for MinimaxSelector {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, state: &BoardState, player: Player) -> Option<Position> {
        Searcher::new(self.depth).search(state, player)
    }
}

/// Which AI plays one side's automated turns.
///
/// Deserializes from `{"kind": "greedy"}` or `{"kind": "minimax", "depth": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AgentKind {
    Greedy,
    Minimax {
        #[serde(default = "default_depth")]
        depth: u32,
    },
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

impl Default for AgentKind {
    fn default() -> Self {
        Self::Minimax {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl AgentKind {
    pub fn selector(self) -> Box<dyn MoveSelector> {
        match self {
            Self::Greedy => Box::new(GreedySelector),
            Self::Minimax { depth } => Box::new(MinimaxSelector { depth }),
        }
    }
}

/// Agents for each side. Either side may also be played by hand through
/// [`GameInstance::place`]; the agent is only consulted by `do_ai_move`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub black: AgentKind,
    pub white: AgentKind,
}

impl GameConfig {
    /// Same agent on both sides.
    pub fn both(agent: AgentKind) -> Self {
        Self {
            black: agent,
            white: agent,
        }
    }
}

/// What the next turn looks like after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Play passes to `next`.
    Continue { next: Player },
    /// `skipped` had no reply; the mover plays again.
    Skipped { skipped: Player },
    GameOver { winner: Winner },
}

impl TurnOutcome {
    /// Classifies `state` right after `result` was applied to it.
    pub fn after(state: &BoardState, result: &MoveResult) -> Self {
        if let Some(winner) = state.winner() {
            return Self::GameOver { winner };
        }

        let current = state.current_player();
        if current == result.player {
            Self::Skipped {
                skipped: current.opponent(),
            }
        } else {
            Self::Continue { next: current }
        }
    }
}

/// A move together with the outcome it led to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    #[serde(rename = "move")]
    pub result: MoveResult,
    pub outcome: TurnOutcome,
}

/// The single owner of the live game. Human and AI moves both go through it.
pub struct GameInstance {
    state: BoardState,
    config: GameConfig,
    last_move: Option<MoveResult>,
    black_selector: Box<dyn MoveSelector>,
    white_selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig) -> Self {
        Self::with_selectors(config, config.black.selector(), config.white.selector())
    }

    /// Uses the given selectors for AI turns instead of the ones `config` names.
    pub fn with_selectors(
        config: GameConfig,
        black_selector: Box<dyn MoveSelector>,
        white_selector: Box<dyn MoveSelector>,
    ) -> Self {
        Self {
            state: BoardState::new(),
            config,
            last_move: None,
            black_selector,
            white_selector,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn last_move(&self) -> Option<&MoveResult> {
        self.last_move.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Plays `(row, col)` for the side to move.
    pub fn place_at(&mut self, row: u8, col: u8) -> Result<TurnReport, GameError> {
        let pos = Position::checked(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        self.place(pos)
    }

    /// Plays `pos` for the side to move.
    pub fn place(&mut self, pos: Position) -> Result<TurnReport, GameError> {
        if self.state.is_game_over() {
            return Err(GameError::GameOver);
        }
        self.apply_move(pos).ok_or(GameError::IllegalMove(pos))
    }

    /// Lets the selector of the side to move play for it.
    pub fn do_ai_move(&mut self) -> Result<TurnReport, GameError> {
        let player = self.state.current_player();
        let selector = match player {
            Player::Black => &self.black_selector,
            Player::White => &self.white_selector,
            Player::None => return Err(GameError::GameOver),
        };
        let selected = selector
            .select_move(&self.state, player)
            .ok_or(GameError::NoLegalMove(player))?;

        self.apply_move(selected)
            .ok_or(GameError::SelectorReturnedIllegal(selected))
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.state.legal_moves().keys().copied().collect()
    }

    pub fn to_game_view(&self) -> GameView {
        let (black_count, white_count) = self.state.count();
        GameView {
            board: self
                .state
                .cells()
                .iter()
                .flatten()
                .map(|cell| cell.code())
                .collect(),
            current_player: self.state.current_player(),
            black_count,
            white_count,
            is_game_over: self.state.is_game_over(),
            winner: self.state.winner(),
            legal_moves: self.legal_moves(),
        }
    }

    /// `None` until the game is over.
    pub fn to_game_result(&self) -> Option<GameResult> {
        let winner = self.state.winner()?;
        let (black_count, white_count) = self.state.count();
        Some(GameResult {
            winner,
            black_count,
            white_count,
        })
    }

    /// Starts over from the initial position, keeping the configuration.
    pub fn restart(&mut self) {
        self.state = BoardState::new();
        self.last_move = None;
    }

    fn apply_move(&mut self, pos: Position) -> Option<TurnReport> {
        let result = self.state.apply_move(pos)?;
        let outcome = TurnOutcome::after(&self.state, &result);
        self.last_move = Some(result.clone());
        Some(TurnReport { result, outcome })
    }

    #[cfg(test)]
    fn set_state_for_test(&mut self, state: BoardState) {
        self.state = state;
        self.last_move = None;
    }
}

impl Default for GameInstance {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
