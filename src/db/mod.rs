//! SQLite persistence for game states.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use repository::SqliteGameRepository;
