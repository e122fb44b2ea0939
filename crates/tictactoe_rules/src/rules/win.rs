//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Player};

/// The eight lines that win the game: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[Cell; 3]; 8] = [
    // Rows
    [Cell::TopLeft, Cell::TopCenter, Cell::TopRight],
    [Cell::CenterLeft, Cell::CenterCenter, Cell::CenterRight],
    [Cell::BottomLeft, Cell::BottomCenter, Cell::BottomRight],
    // Columns
    [Cell::TopLeft, Cell::CenterLeft, Cell::BottomLeft],
    [Cell::TopCenter, Cell::CenterCenter, Cell::BottomCenter],
    [Cell::TopRight, Cell::CenterRight, Cell::BottomRight],
    // Diagonals
    [Cell::TopLeft, Cell::CenterCenter, Cell::BottomRight],
    [Cell::BottomLeft, Cell::CenterCenter, Cell::TopRight],
];

/// Checks if `player` owns every cell of some winning line.
pub fn is_winning(board: &Board, player: Player) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|cell| board.get(*cell) == Some(player)))
}

/// Returns the player owning a complete line, if any.
///
/// On a board reachable through legal play at most one player can own a
/// line; if both do, player 1 is reported.
pub fn winner(board: &Board) -> Option<Player> {
    [Player::One, Player::Two]
        .into_iter()
        .find(|player| is_winning(board, *player))
}
