use crate::board::BoardState;
use crate::types::Player;

/// Material balance from `player`'s point of view: own discs minus the
/// opponent's, scanning every occupied square.
pub fn evaluate(state: &BoardState, player: Player) -> i32 {
    state
        .occupied_positions()
        .map(|pos| if state.cell(pos) == player { 1 } else { -1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn initial_board_is_balanced() {
        let state = BoardState::new();

        assert_eq!(evaluate(&state, Player::Black), 0);
        assert_eq!(evaluate(&state, Player::White), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric_between_sides() {
        let mut state = BoardState::new();
        state.apply_move(Position::new(2, 3)).expect("legal");

        assert_eq!(evaluate(&state, Player::Black), 3);
        assert_eq!(evaluate(&state, Player::White), -3);
    }
}
