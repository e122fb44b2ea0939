//! At-rest invariants of a game state.
//!
//! States built by [`apply_move`](crate::apply_move) satisfy these by
//! construction. States arriving from outside (a database row, a request
//! body) are only well-formed JSON; [`check_invariants`] tells whether their
//! variant agrees with their board.
//!
//! Only the shape of each variant is checked. Mark counts and whose turn it
//! is are not: seeded or hand-edited positions are legal starting points.

use crate::rules::{is_full, is_winning, winner};
use crate::{GameState, Player};
use derive_more::{Display, Error};

/// A state whose variant contradicts its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvariantViolation {
    /// An ongoing game with every cell marked.
    #[display("Ongoing game has a full board")]
    OngoingBoardFull,

    /// A finished game whose recorded winner owns no line.
    #[display("Winner {} owns no winning line", player)]
    WinnerWithoutLine {
        /// The recorded winner.
        player: Player,
    },

    /// A draw whose board is not full, or in which someone owns a line.
    #[display("Draw is not a full board without a winning line")]
    InvalidDraw,
}

/// Checks that `state` satisfies the invariants of its variant.
///
/// - `Ongoing`: fewer than 9 marks.
/// - `Over` with a winner: the winner owns a line.
/// - `Over` without a winner: 9 marks and no line owned by anyone.
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] found.
pub fn check_invariants(state: &GameState) -> Result<(), InvariantViolation> {
    let marks = state.marks();

    match state {
        GameState::Ongoing { .. } if is_full(marks) => Err(InvariantViolation::OngoingBoardFull),
        GameState::Ongoing { .. } => Ok(()),
        GameState::Over {
            winner: Some(player),
            ..
        } if !is_winning(marks, *player) => {
            Err(InvariantViolation::WinnerWithoutLine { player: *player })
        }
        GameState::Over {
            winner: Some(_), ..
        } => Ok(()),
        GameState::Over { winner: None, .. } if !is_full(marks) || winner(marks).is_some() => {
            Err(InvariantViolation::InvalidDraw)
        }
        GameState::Over { winner: None, .. } => Ok(()),
    }
}
