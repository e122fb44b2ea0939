//! The move transition engine.

use crate::contracts::LegalMark;
use crate::rules::{is_full, is_winning};
use crate::{GameState, Mark, Rejection};

/// Applies `mark` to `state`, returning the next state or the reason the
/// mark was refused.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. the game is over → [`Rejection::GameIsOver`]
/// 2. it is not `mark.player`'s turn → [`Rejection::PlayerCantMove`]
/// 3. the cell is already marked → [`Rejection::CellAlreadyMarked`]
///
/// An accepted mark yields `Over` with the mover as winner if it completes a
/// line, `Over` with no winner if it fills the board, and otherwise `Ongoing`
/// with the opponent to move. A win on the last free cell is a win, not a
/// draw.
///
/// `state` is only borrowed; the returned state owns a fresh board.
///
/// # Errors
///
/// Returns a [`Rejection`] for any mark that breaks the rules above.
pub fn apply_move(state: &GameState, mark: Mark) -> Result<GameState, Rejection> {
    LegalMark::check(&mark, state)?;

    let updated_marks = state.marks().with_mark(mark.cell, mark.player);

    if is_winning(&updated_marks, mark.player) {
        return Ok(GameState::over(Some(mark.player), updated_marks));
    }

    if is_full(&updated_marks) {
        return Ok(GameState::over(None, updated_marks));
    }

    Ok(GameState::ongoing(mark.player.opponent(), updated_marks))
}
