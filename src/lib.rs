//! Tic-tac-toe server library - storage and HTTP around the rules engine
//!
//! The rules live in [`tictactoe_rules`] and are pure. This crate supplies
//! everything around them: an application service that loads a game,
//! asks the engine for the next state and persists it, repositories that
//! serialize moves per game, and an axum REST API.
//!
//! # Architecture
//!
//! - **Application**: use cases (new game, get game, add mark)
//! - **Repository**: storage contract, in-memory and SQLite implementations
//! - **Server**: REST endpoints mapping rejections to 400 and unknown games to 404
//! - **Config**: layered TOML / environment / flag configuration
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tictactoe_rules::{Cell, Mark, Player};
//! use tictactoe_server::{Application, InMemoryGameRepository, TimestampIdGenerator};
//!
//! # fn example() -> Result<(), tictactoe_server::StoreError> {
//! let app = Application::new(
//!     Arc::new(InMemoryGameRepository::new()),
//!     Arc::new(TimestampIdGenerator::new()),
//!     Player::One,
//! );
//! let game = app.new_game()?;
//! let game = app.add_mark(game.id(), Mark::new(Player::One, Cell::CenterCenter))?;
//! assert_eq!(game.state().next_player(), Some(Player::Two));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod application;
mod config;
mod db;
mod id;
mod repository;

/// REST API.
pub mod server;

// Crate-level exports - Application service
pub use application::{Application, GameRecord};

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, ServerConfig};

// Crate-level exports - Persistence
pub use db::{DbError, DbErrorKind, SqliteGameRepository};
pub use repository::{GameId, GameRepository, InMemoryGameRepository, StoreError, Transition};

// Crate-level exports - Id generation
pub use id::{GameIdGenerator, TimestampIdGenerator};

// Crate-level exports - Server
pub use server::ApiError;
