//! The nine cells of the board.

use serde::{Deserialize, Serialize};

/// A cell on the 3x3 board, named by row then column.
///
/// The set is closed. Cells order in row-major order, which is also the
/// order boards serialize in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Cell {
    /// Row 1, column 1.
    TopLeft,
    /// Row 1, column 2.
    TopCenter,
    /// Row 1, column 3.
    TopRight,
    /// Row 2, column 1.
    CenterLeft,
    /// Row 2, column 2.
    CenterCenter,
    /// Row 2, column 3.
    CenterRight,
    /// Row 3, column 1.
    BottomLeft,
    /// Row 3, column 2.
    BottomCenter,
    /// Row 3, column 3.
    BottomRight,
}

impl Cell {
    /// All 9 cells in row-major order.
    pub const ALL: [Cell; 9] = [
        Cell::TopLeft,
        Cell::TopCenter,
        Cell::TopRight,
        Cell::CenterLeft,
        Cell::CenterCenter,
        Cell::CenterRight,
        Cell::BottomLeft,
        Cell::BottomCenter,
        Cell::BottomRight,
    ];

    /// Zero-based row (0 = top).
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Zero-based column (0 = left).
    pub fn column(self) -> usize {
        self.index() % 3
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        match self {
            Cell::TopLeft => 0,
            Cell::TopCenter => 1,
            Cell::TopRight => 2,
            Cell::CenterLeft => 3,
            Cell::CenterCenter => 4,
            Cell::CenterRight => 5,
            Cell::BottomLeft => 6,
            Cell::BottomCenter => 7,
            Cell::BottomRight => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_matches_iteration_order() {
        let iterated: Vec<Cell> = Cell::iter().collect();
        assert_eq!(iterated, Cell::ALL.to_vec());
    }

    #[test]
    fn test_index_is_position_in_all() {
        for (position, cell) in Cell::ALL.iter().enumerate() {
            assert_eq!(cell.index(), position);
        }
    }

    #[test]
    fn test_row_and_column() {
        assert_eq!((Cell::TopLeft.row(), Cell::TopLeft.column()), (0, 0));
        assert_eq!((Cell::CenterRight.row(), Cell::CenterRight.column()), (1, 2));
        assert_eq!((Cell::BottomCenter.row(), Cell::BottomCenter.column()), (2, 1));
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(Cell::from_str("CENTER_CENTER"), Ok(Cell::CenterCenter));
        assert_eq!(Cell::from_str("bottom_left"), Ok(Cell::BottomLeft));
        assert!(Cell::from_str("MIDDLE").is_err());
        assert_eq!(Cell::TopRight.to_string(), "TOP_RIGHT");
    }
}
