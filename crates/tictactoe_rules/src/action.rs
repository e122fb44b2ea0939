//! Proposed moves and the reasons they can be refused.
//!
//! Moves are domain events, not side effects: a [`Mark`] states a player's
//! intent and is validated against a state before anything changes.

use crate::{Cell, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A player's claim on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    /// The player placing the mark.
    pub player: Player,
    /// The cell being claimed.
    pub cell: Cell,
}

impl Mark {
    /// Creates a new mark.
    pub fn new(player: Player, cell: Cell) -> Self {
        Self { player, cell }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell)
    }
}

/// Why a mark was refused.
///
/// Rejections are expected outcomes returned as values. The set is closed;
/// match it exhaustively. Serializes tagged by `error`, e.g.
/// `{"error":"CELL_ALREADY_MARKED","cell":"TOP_LEFT"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    /// The target cell already holds a mark, whoever placed it.
    #[display("Cell {} is already marked", cell)]
    CellAlreadyMarked {
        /// The occupied cell.
        cell: Cell,
    },

    /// The player is not the one expected to move.
    #[display("It's not {}'s turn", player)]
    PlayerCantMove {
        /// The player who tried to move.
        player: Player,
    },

    /// The game has finished; no further marks are accepted.
    #[display("Game is already over")]
    GameIsOver,
}
