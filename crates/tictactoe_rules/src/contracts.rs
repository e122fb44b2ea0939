//! Preconditions a mark must satisfy before it is applied.
//!
//! Each precondition is a small named check. [`LegalMark`] composes them in
//! the one order that decides which rejection is reported when a mark breaks
//! several rules at once: game over, then turn, then occupancy.

use crate::{GameState, Mark, Player, Rejection};

/// Precondition: the game must still be ongoing.
///
/// Yields the player expected to move.
pub(crate) struct GameNotOver;

impl GameNotOver {
    pub(crate) fn check(state: &GameState) -> Result<Player, Rejection> {
        match state {
            GameState::Ongoing { next_player, .. } => Ok(*next_player),
            GameState::Over { .. } => Err(Rejection::GameIsOver),
        }
    }
}

/// Precondition: it must be the marking player's turn.
pub(crate) struct PlayersTurn;

impl PlayersTurn {
    pub(crate) fn check(mark: &Mark, next_player: Player) -> Result<(), Rejection> {
        if mark.player != next_player {
            Err(Rejection::PlayerCantMove {
                player: mark.player,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell must be free.
pub(crate) struct CellIsFree;

impl CellIsFree {
    pub(crate) fn check(mark: &Mark, state: &GameState) -> Result<(), Rejection> {
        if state.marks().is_marked(mark.cell) {
            Err(Rejection::CellAlreadyMarked { cell: mark.cell })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: all of the above, in order.
pub(crate) struct LegalMark;

impl LegalMark {
    pub(crate) fn check(mark: &Mark, state: &GameState) -> Result<(), Rejection> {
        let next_player = GameNotOver::check(state)?;
        PlayersTurn::check(mark, next_player)?;
        CellIsFree::check(mark, state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Cell};

    #[test]
    fn test_over_state_fails_first_check() {
        let state = GameState::over(None, Board::new());
        assert_eq!(GameNotOver::check(&state), Err(Rejection::GameIsOver));
    }

    #[test]
    fn test_turn_checked_before_occupancy() {
        let state = GameState::ongoing(
            Player::Two,
            Board::from_iter([(Cell::TopLeft, Player::One)]),
        );
        let mark = Mark::new(Player::One, Cell::TopLeft);
        assert_eq!(
            LegalMark::check(&mark, &state),
            Err(Rejection::PlayerCantMove { player: Player::One })
        );
    }

    #[test]
    fn test_free_cell_passes() {
        let state = GameState::new(Player::One);
        let mark = Mark::new(Player::One, Cell::BottomRight);
        assert_eq!(LegalMark::check(&mark, &state), Ok(()));
    }
}
