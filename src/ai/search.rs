use crate::ai::eval::evaluate;
use crate::board::BoardState;
use crate::types::{Player, Position};

/// Lookahead used when no depth is configured.
pub const DEFAULT_DEPTH: u32 = 3;
const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// One-ply greedy choice: the move flipping the most discs.
/// Ties keep the first move in row-major order. `None` when there is no legal move.
pub fn greedy_move(state: &BoardState) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;

    for &mv in state.legal_moves().keys() {
        let mut next = state.clone();
        let Some(result) = next.apply_move(mv) else {
            continue;
        };
        let score = result.flipped.len();
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, _)| mv)
}

/// Depth-limited plain minimax over cloned snapshots.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: u32,
    nodes: u64,
}

impl Searcher {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            nodes: 0,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Searches the best move for `player` on `state`.
    ///
    /// Each candidate is scored by a minimizing search of `max_depth - 1`
    /// further plies; a depth of 0 behaves like 1. Ties keep the first
    /// candidate in row-major order. `None` when there is no legal move.
    pub fn search(&mut self, state: &BoardState, player: Player) -> Option<Position> {
        self.nodes = 0;
        let child_depth = self.max_depth.saturating_sub(1);
        let mut best: Option<(Position, i32)> = None;

        for &mv in state.legal_moves().keys() {
            let mut next = state.clone();
            let Some(_) = next.apply_move(mv) else {
                continue;
            };
            self.nodes += 1;

            let score = self.minimax(&next, player, child_depth, false);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv)
    }

    /// Number of hypothetical states created by the last `search`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn minimax(&mut self, state: &BoardState, player: Player, depth: u32, maximizing: bool) -> i32 {
        // A non-terminal state without moves would otherwise fold to a sentinel.
        if depth == 0 || state.is_game_over() || state.legal_moves().is_empty() {
            return evaluate(state, player);
        }

        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };

        // Always expands the side actually on turn, even after a pass.
        for &mv in state.legal_moves().keys() {
            let mut next = state.clone();
            let Some(_) = next.apply_move(mv) else {
                continue;
            };
            self.nodes += 1;

            let score = self.minimax(&next, player, depth - 1, !maximizing);
            best_score = if maximizing {
                best_score.max(score)
            } else {
                best_score.min(score)
            };
        }

        best_score
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
