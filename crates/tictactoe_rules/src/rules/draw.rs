//! Draw detection logic for tic-tac-toe.

use crate::{Board, Cell};

/// Checks if every cell on the board is marked.
///
/// A full board with no winning line is a draw.
pub fn is_full(board: &Board) -> bool {
    board.len() == Cell::ALL.len()
}
