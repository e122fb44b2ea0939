//! Tic-tac-toe rules - state model and move transition engine.
//!
//! Everything in this crate is pure: no I/O, no logging, no shared mutable
//! state. The single entry point for advancing a game is [`apply_move`],
//! which either returns a brand-new [`GameState`] or a [`Rejection`]
//! explaining why the move was refused.
//!
//! # Example
//!
//! ```
//! use tictactoe_rules::{apply_move, Cell, GameState, Mark, Player};
//!
//! let game = GameState::new(Player::One);
//! let next = apply_move(&game, Mark::new(Player::One, Cell::CenterCenter)).unwrap();
//! assert_eq!(next.next_player(), Some(Player::Two));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod cell;
mod contracts;
mod invariants;
mod rules;
mod transition;
mod types;

pub use action::{Mark, Rejection};
pub use board::Board;
pub use cell::Cell;
pub use invariants::{InvariantViolation, check_invariants};
pub use rules::{WINNING_LINES, is_full, is_winning, winner};
pub use transition::apply_move;
pub use types::{GameState, InvalidPlayer, Player};
