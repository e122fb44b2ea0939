//! Board marks keyed by cell.

use crate::{Cell, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marks placed on the board, keyed by cell.
///
/// A cell holds at most one mark, so a board never has more than 9 entries.
/// Boards are values: [`Board::with_mark`] returns a new board and leaves the
/// receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    marks: BTreeMap<Cell, Player>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The player who marked `cell`, if any.
    pub fn get(&self, cell: Cell) -> Option<Player> {
        self.marks.get(&cell).copied()
    }

    /// Whether `cell` has been marked by anyone.
    pub fn is_marked(&self, cell: Cell) -> bool {
        self.marks.contains_key(&cell)
    }

    /// Number of marked cells.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether no cell has been marked.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks in row-major cell order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Player)> + '_ {
        self.marks.iter().map(|(cell, player)| (*cell, *player))
    }

    /// Number of cells marked by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.marks.values().filter(|p| **p == player).count()
    }

    /// Unmarked cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::ALL
            .iter()
            .copied()
            .filter(|cell| !self.is_marked(*cell))
            .collect()
    }

    /// Returns a copy of this board with `cell` set to `player`.
    ///
    /// Overwrites an existing mark; callers that need occupancy checks do
    /// them first.
    pub fn with_mark(&self, cell: Cell, player: Player) -> Self {
        let mut marks = self.marks.clone();
        marks.insert(cell, player);
        Self { marks }
    }

    /// Formats the board as a 3x3 grid, `.` for empty cells.
    pub fn display(&self) -> String {
        let mut grid = [['.'; 3]; 3];
        for (cell, player) in self.iter() {
            grid[cell.row()][cell.column()] = char::from(b'0' + player.number());
        }
        grid.iter()
            .map(|row| format!("{}|{}|{}\n", row[0], row[1], row[2]))
            .collect()
    }
}

impl FromIterator<(Cell, Player)> for Board {
    fn from_iter<I: IntoIterator<Item = (Cell, Player)>>(iter: I) -> Self {
        Self {
            marks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::from_iter([(Cell::TopLeft, Player::One)]);
        let updated = board.with_mark(Cell::CenterCenter, Player::Two);

        assert_eq!(board.len(), 1);
        assert_eq!(board.get(Cell::CenterCenter), None);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.get(Cell::CenterCenter), Some(Player::Two));
    }

    #[test]
    fn test_empty_cells_filters_marked() {
        let board = Board::from_iter([
            (Cell::TopLeft, Player::One),
            (Cell::CenterCenter, Player::Two),
        ]);
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 7);
        assert!(!empty.contains(&Cell::TopLeft));
        assert!(!empty.contains(&Cell::CenterCenter));
        assert_eq!(empty[0], Cell::TopCenter);
    }

    #[test]
    fn test_count_per_player() {
        let board = Board::from_iter([
            (Cell::TopLeft, Player::One),
            (Cell::TopRight, Player::One),
            (Cell::BottomLeft, Player::Two),
        ]);
        assert_eq!(board.count(Player::One), 2);
        assert_eq!(board.count(Player::Two), 1);
    }

    #[test]
    fn test_display_grid() {
        let board = Board::from_iter([
            (Cell::TopLeft, Player::One),
            (Cell::BottomRight, Player::Two),
        ]);
        assert_eq!(board.display(), "1|.|.\n.|.|.\n.|.|2\n");
    }
}
