use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Side to move, and also the content of a board cell.
///
/// `None` is both the empty cell and the "no player" sentinel used once the
/// game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[default]
    None,
    Black,
    White,
}

impl Player {
    /// Black <-> White. `None` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
            Self::None => Self::None,
        }
    }

    /// Cell code used by the presentation layer: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Black => "Black",
            Self::White => "White",
        };
        f.write_str(name)
    }
}

/// A board coordinate.
///
/// Ordering is row first, then column, so ordered collections of positions
/// iterate in row-major board order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns `None` when the coordinate lies outside the board.
    pub fn checked(row: u8, col: u8) -> Option<Self> {
        (usize::from(row) < BOARD_SIZE && usize::from(col) < BOARD_SIZE)
            .then_some(Self { row, col })
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        usize::from(self.row) * BOARD_SIZE + usize::from(self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl Winner {
    /// Strict disc-count comparison; equal counts are a draw.
    pub fn from_counts(black: u8, white: u8) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Self::Black,
            std::cmp::Ordering::Less => Self::White,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Black => "Black",
            Self::White => "White",
            Self::Draw => "Draw",
        };
        f.write_str(name)
    }
}

/// What a successful move changed. Lives for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub player: Player,
    pub position: Position,
    /// Flipped discs, in capture order.
    pub flipped: Vec<Position>,
}

/// Snapshot of the game handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// 64 cell codes in row-major order (see [`Player::code`]).
    pub board: Vec<u8>,
    pub current_player: Player,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `None` while the game is running.
    /// - `Some(..)` once `is_game_over` is true.
    pub winner: Option<Winner>,
    pub legal_moves: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Winner,
    pub black_count: u8,
    pub white_count: u8,
}
