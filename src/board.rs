use std::collections::BTreeMap;

use crate::types::{BOARD_SIZE, MoveResult, NUM_SQUARES, Player, Position, Winner};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub type Cells = [[Player; BOARD_SIZE]; BOARD_SIZE];

/// Legal moves of the side to move, each mapped to the discs it would flip.
/// Keys iterate in row-major order.
pub type LegalMoves = BTreeMap<Position, Vec<Position>>;

/// Othello rules engine: grid, disc counts, side to move and legal moves.
///
/// Cloning produces a fully independent snapshot, which is what the search
/// explores instead of the live game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: Cells,
    black_count: u8,
    white_count: u8,
    current_player: Player,
    game_over: bool,
    winner: Option<Winner>,
    legal_moves: LegalMoves,
}

impl BoardState {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white. Black to move.
    pub fn new() -> Self {
        let mut cells = [[Player::None; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Player::White;
        cells[3][4] = Player::Black;
        cells[4][3] = Player::Black;
        cells[4][4] = Player::White;

        let mut state = Self {
            cells,
            black_count: 2,
            white_count: 2,
            current_player: Player::Black,
            game_over: false,
            winner: None,
            legal_moves: LegalMoves::new(),
        };
        state.legal_moves = state.compute_legal_moves(Player::Black);
        state
    }

    /// Builds a state from an arbitrary grid with `to_move` on turn.
    ///
    /// Pass resolution runs immediately: if `to_move` is stuck the turn goes
    /// to the opponent, and if both are stuck the game is over. `to_move ==
    /// Player::None` is treated as Black.
    pub fn from_cells(cells: Cells, to_move: Player) -> Self {
        let count = |player: Player| {
            cells
                .iter()
                .flatten()
                .filter(|&&cell| cell == player)
                .count() as u8
        };
        let (black_count, white_count) = (count(Player::Black), count(Player::White));
        let to_move = match to_move {
            Player::None => Player::Black,
            player => player,
        };

        let mut state = Self {
            cells,
            black_count,
            white_count,
            current_player: to_move,
            game_over: false,
            winner: None,
            legal_moves: LegalMoves::new(),
        };
        state.legal_moves = state.compute_legal_moves(to_move);
        if state.legal_moves.is_empty() {
            state.pass_turn();
        }
        state
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Player {
        self.cells[usize::from(pos.row)][usize::from(pos.col)]
    }

    /// Disc count of `player`; always 0 for `Player::None`.
    pub fn disc_count(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.black_count,
            Player::White => self.white_count,
            Player::None => 0,
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black_count, self.white_count)
    }

    /// `Player::None` once the game is over.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// `Some` only once the game is over.
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal_moves
    }

    pub fn is_legal(&self, pos: Position) -> bool {
        self.legal_moves.contains_key(&pos)
    }

    /// Plays `pos` for the side to move.
    /// Returns `None` (and leaves the state untouched) when the move is not legal.
    pub fn apply_move(&mut self, pos: Position) -> Option<MoveResult> {
        // The map is rebuilt by `pass_turn`, so the capture list can be taken.
        let flipped = self.legal_moves.remove(&pos)?;
        let mover = self.current_player;

        self.set_cell(pos, mover);
        for &p in &flipped {
            self.set_cell(p, mover);
        }
        self.update_disc_counts(mover, flipped.len());
        self.pass_turn();

        Some(MoveResult {
            player: mover,
            position: pos,
            flipped,
        })
    }

    /// Occupied squares in row-major order. Each call is a fresh traversal.
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..NUM_SQUARES).filter_map(move |idx| {
            let pos = Position::new((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8);
            (self.cell(pos) != Player::None).then_some(pos)
        })
    }

    fn set_cell(&mut self, pos: Position, player: Player) {
        self.cells[usize::from(pos.row)][usize::from(pos.col)] = player;
    }

    fn update_disc_counts(&mut self, mover: Player, captured: usize) {
        let captured = captured as u8;
        let (mine, theirs) = match mover {
            Player::Black => (&mut self.black_count, &mut self.white_count),
            Player::White => (&mut self.white_count, &mut self.black_count),
            Player::None => unreachable!("move applied with no player on turn"),
        };
        debug_assert!(*theirs >= captured, "captured more discs than the opponent owns");
        *mine += captured + 1;
        *theirs -= captured;
        debug_assert!(
            usize::from(self.black_count) + usize::from(self.white_count) <= NUM_SQUARES,
            "disc counts exceed the board"
        );
    }

    fn change_player(&mut self) {
        self.current_player = self.current_player.opponent();
        self.legal_moves = self.compute_legal_moves(self.current_player);
    }

    /// Hands the turn to the opponent; if the opponent is stuck the mover
    /// plays again, and if both are stuck the game ends.
    fn pass_turn(&mut self) {
        self.change_player();
        if !self.legal_moves.is_empty() {
            return;
        }

        self.change_player();
        if self.legal_moves.is_empty() {
            self.current_player = Player::None;
            self.game_over = true;
            self.winner = Some(Winner::from_counts(self.black_count, self.white_count));
        }
    }

    fn compute_legal_moves(&self, player: Player) -> LegalMoves {
        let mut legal = LegalMoves::new();
        if player == Player::None {
            return legal;
        }

        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let pos = Position::new(row, col);
                if self.cell(pos) != Player::None {
                    continue;
                }
                let flips = self.collect_flips(pos, player);
                if !flips.is_empty() {
                    legal.insert(pos, flips);
                }
            }
        }

        legal
    }

    fn collect_flips(&self, pos: Position, player: Player) -> Vec<Position> {
        let opponent = player.opponent();
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut r = i32::from(pos.row) + dr;
            let mut c = i32::from(pos.col) + dc;
            let mut line = Vec::new();

            while in_bounds(r, c) {
                let square = Position::new(r as u8, c as u8);
                let cell = self.cell(square);
                if cell == opponent {
                    line.push(square);
                } else {
                    if cell == player {
                        flips.append(&mut line);
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn empty_cells() -> Cells {
        [[Player::None; BOARD_SIZE]; BOARD_SIZE]
    }

    fn place(cells: &mut Cells, player: Player, squares: &[(usize, usize)]) {
        for &(row, col) in squares {
            cells[row][col] = player;
        }
    }

    fn grid_count(state: &BoardState, player: Player) -> u8 {
        state
            .occupied_positions()
            .filter(|&p| state.cell(p) == player)
            .count() as u8
    }

    #[test]
    fn initial_board_has_four_centre_discs_and_four_single_flip_moves() {
        let state = BoardState::new();

        assert_eq!(state.count(), (2, 2));
        assert_eq!(state.current_player(), Player::Black);
        assert!(!state.is_game_over());
        assert_eq!(state.winner(), None);
        assert_eq!(state.cell(pos(3, 3)), Player::White);
        assert_eq!(state.cell(pos(4, 4)), Player::White);
        assert_eq!(state.cell(pos(3, 4)), Player::Black);
        assert_eq!(state.cell(pos(4, 3)), Player::Black);

        let moves: Vec<_> = state.legal_moves().keys().copied().collect();
        assert_eq!(moves, vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]);
        assert!(state.legal_moves().values().all(|flips| flips.len() == 1));
    }

    #[test]
    fn opening_move_flips_centre_disc_and_passes_turn_to_white() {
        let mut state = BoardState::new();

        let result = state.apply_move(pos(2, 3)).expect("d3 is legal");

        assert_eq!(result.player, Player::Black);
        assert_eq!(result.position, pos(2, 3));
        assert_eq!(result.flipped, vec![pos(3, 3)]);
        assert_eq!(state.count(), (4, 1));
        assert_eq!(state.cell(pos(3, 3)), Player::Black);
        assert_eq!(state.current_player(), Player::White);
        assert!(!state.legal_moves().is_empty());
    }

    #[test]
    fn illegal_move_returns_none_and_keeps_state_unchanged() {
        let mut state = BoardState::new();
        let before = state.clone();

        assert!(state.apply_move(pos(0, 0)).is_none());
        assert!(state.apply_move(pos(3, 3)).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn capture_list_follows_direction_order() {
        let mut cells = empty_cells();
        place(&mut cells, Player::Black, &[(0, 2), (2, 0), (2, 5)]);
        place(&mut cells, Player::White, &[(1, 2), (2, 1), (2, 3), (2, 4)]);
        let mut state = BoardState::from_cells(cells, Player::Black);

        assert_eq!(
            state.legal_moves().get(&pos(2, 2)),
            Some(&vec![pos(1, 2), pos(2, 1), pos(2, 3), pos(2, 4)])
        );

        let result = state.apply_move(pos(2, 2)).expect("(2,2) is legal");
        assert_eq!(result.flipped.len(), 4);
        assert_eq!(state.count(), (8, 0));
    }

    #[test]
    fn run_ending_on_empty_or_edge_captures_nothing() {
        let mut cells = empty_cells();
        place(&mut cells, Player::White, &[(0, 0), (0, 1), (2, 5), (2, 6), (5, 5)]);
        place(&mut cells, Player::Black, &[(4, 4)]);
        let state = BoardState::from_cells(cells, Player::Black);

        // W W then the board edge.
        assert!(!state.is_legal(pos(0, 2)));
        // W W then an empty square.
        assert!(!state.is_legal(pos(2, 4)));
        assert!(state.is_legal(pos(6, 6)));
        assert!(!state.is_legal(pos(0, 0)));
    }

    #[test]
    fn turn_repeats_when_opponent_has_no_reply() {
        let mut cells = empty_cells();
        place(&mut cells, Player::Black, &[(0, 0), (7, 0)]);
        place(&mut cells, Player::White, &[(0, 1), (7, 1)]);
        let mut state = BoardState::from_cells(cells, Player::Black);
        assert_eq!(
            state.legal_moves().keys().copied().collect::<Vec<_>>(),
            vec![pos(0, 2), pos(7, 2)]
        );

        let result = state.apply_move(pos(0, 2)).expect("legal");

        assert_eq!(result.player, Player::Black);
        assert_eq!(state.current_player(), Player::Black);
        assert!(!state.is_game_over());
        assert_eq!(
            state.legal_moves().keys().copied().collect::<Vec<_>>(),
            vec![pos(7, 2)]
        );
    }

    #[test]
    fn both_players_stuck_ends_game_with_winner() {
        let mut cells = empty_cells();
        place(&mut cells, Player::Black, &[(0, 0)]);
        place(&mut cells, Player::White, &[(0, 1)]);
        let mut state = BoardState::from_cells(cells, Player::Black);

        state.apply_move(pos(0, 2)).expect("legal");

        assert!(state.is_game_over());
        assert_eq!(state.current_player(), Player::None);
        assert_eq!(state.winner(), Some(Winner::Black));
        assert_eq!(state.count(), (3, 0));
        assert!(state.legal_moves().is_empty());
        assert!(state.apply_move(pos(0, 3)).is_none());
    }

    #[test]
    fn equal_counts_at_game_end_is_a_draw() {
        let mut cells = empty_cells();
        place(&mut cells, Player::Black, &[(0, 0)]);
        place(&mut cells, Player::White, &[(0, 1), (7, 5), (7, 6), (7, 7)]);
        let mut state = BoardState::from_cells(cells, Player::Black);

        state.apply_move(pos(0, 2)).expect("legal");

        assert!(state.is_game_over());
        assert_eq!(state.count(), (3, 3));
        assert_eq!(state.winner(), Some(Winner::Draw));
    }

    #[test]
    fn from_cells_resolves_pass_for_stuck_side() {
        let mut cells = empty_cells();
        place(&mut cells, Player::Black, &[(0, 0)]);
        place(&mut cells, Player::White, &[(0, 1)]);

        // White cannot flank anything, so the turn goes to Black.
        let state = BoardState::from_cells(cells, Player::White);
        assert_eq!(state.current_player(), Player::Black);
        assert!(!state.is_game_over());

        let mut isolated = empty_cells();
        place(&mut isolated, Player::Black, &[(0, 0)]);
        place(&mut isolated, Player::White, &[(7, 7)]);
        let state = BoardState::from_cells(isolated, Player::Black);
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(Winner::Draw));
    }

    #[test]
    fn clone_is_independent_of_source() {
        let original = BoardState::new();
        let mut copy = original.clone();

        copy.apply_move(pos(2, 3)).expect("legal");

        assert_eq!(original, BoardState::new());
        assert_ne!(copy, original);
    }

    #[test]
    fn occupied_positions_are_row_major_and_restartable() {
        let state = BoardState::new();

        let first: Vec<_> = state.occupied_positions().collect();
        let second: Vec<_> = state.occupied_positions().collect();

        assert_eq!(first, vec![pos(3, 3), pos(3, 4), pos(4, 3), pos(4, 4)]);
        assert_eq!(first, second);
        assert_eq!(state.legal_moves(), state.clone().legal_moves());
    }

    #[test]
    fn counts_match_grid_after_opening_sequence() {
        let mut state = BoardState::new();
        for mv in [pos(2, 3), pos(2, 2), pos(2, 1)] {
            state.apply_move(mv).expect("legal opening move");
            assert_eq!(state.disc_count(Player::Black), grid_count(&state, Player::Black));
            assert_eq!(state.disc_count(Player::White), grid_count(&state, Player::White));
        }
        assert_eq!(state.disc_count(Player::None), 0);
    }
}
