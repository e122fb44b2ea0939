//! Game rules for tic-tac-toe.
//!
//! Pure predicates over a [`Board`](crate::Board). These are the single
//! source of truth for "is this a win" and "is this a draw"; both the
//! transition engine and the at-rest invariant checks call them.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WINNING_LINES, is_winning, winner};
