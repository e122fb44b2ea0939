//! Core domain types for tic-tac-toe.

use crate::board::Board;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// Serializes as the integer `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    /// Player 1.
    #[display("player 1")]
    One,
    /// Player 2.
    #[display("player 2")]
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The player's number (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

/// A player given as anything other than 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid player '{}', expected 1 or 2", input)]
pub struct InvalidPlayer {
    /// The rejected input, as given.
    pub input: String,
}

impl InvalidPlayer {
    fn new(input: impl ToString) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidPlayer;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(InvalidPlayer::new(other)),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = InvalidPlayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Player::One),
            "2" => Ok(Player::Two),
            _ => Err(InvalidPlayer::new(s)),
        }
    }
}

/// Complete game state.
///
/// Values are immutable snapshots: the transition engine never edits a
/// state, it builds the next one. `Over` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// The game accepts moves from `next_player`. The board is never full.
    Ongoing {
        /// The only player allowed to move.
        next_player: Player,
        /// Marks placed so far.
        marks: Board,
    },
    /// The game has finished. `winner` is `None` for a draw.
    Over {
        /// The player owning a complete line, if any.
        winner: Option<Player>,
        /// Final board.
        marks: Board,
    },
}

impl GameState {
    /// Creates a fresh game with an empty board.
    pub fn new(starting_player: Player) -> Self {
        Self::ongoing(starting_player, Board::new())
    }

    /// Creates an ongoing state.
    pub fn ongoing(next_player: Player, marks: Board) -> Self {
        GameState::Ongoing { next_player, marks }
    }

    /// Creates a finished state.
    pub fn over(winner: Option<Player>, marks: Board) -> Self {
        GameState::Over { winner, marks }
    }

    /// Returns the board.
    pub fn marks(&self) -> &Board {
        match self {
            GameState::Ongoing { marks, .. } | GameState::Over { marks, .. } => marks,
        }
    }

    /// Whether the game has finished.
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Over { .. })
    }

    /// The player to move, or `None` once the game is over.
    pub fn next_player(&self) -> Option<Player> {
        match self {
            GameState::Ongoing { next_player, .. } => Some(*next_player),
            GameState::Over { .. } => None,
        }
    }

    /// The winner, or `None` while ongoing or after a draw.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::Ongoing { .. } => None,
            GameState::Over { winner, .. } => *winner,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::One)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_player_from_number() {
        assert_eq!(Player::try_from(1), Ok(Player::One));
        assert_eq!(Player::try_from(2), Ok(Player::Two));
        assert_eq!(Player::try_from(3), Err(InvalidPlayer::new(3)));
        assert_eq!("2".parse::<Player>(), Ok(Player::Two));
        assert_eq!(" 1 ".parse::<Player>(), Ok(Player::One));
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = "abc".parse::<Player>().unwrap_err();
        assert_eq!(err.input, "abc");
        assert_eq!(err.to_string(), "Invalid player 'abc', expected 1 or 2");
        assert_eq!("300".parse::<Player>().unwrap_err().input, "300");
    }

    #[test]
    fn test_new_game_is_empty_and_ongoing() {
        let game = GameState::new(Player::Two);
        assert!(!game.is_over());
        assert_eq!(game.next_player(), Some(Player::Two));
        assert_eq!(game.winner(), None);
        assert!(game.marks().is_empty());
    }

    #[test]
    fn test_over_accessors() {
        let marks = Board::from_iter([(Cell::TopLeft, Player::One)]);
        let game = GameState::over(Some(Player::One), marks.clone());
        assert!(game.is_over());
        assert_eq!(game.next_player(), None);
        assert_eq!(game.winner(), Some(Player::One));
        assert_eq!(game.marks(), &marks);
    }
}
