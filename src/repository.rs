//! Storage contract for game states.
//!
//! The rules engine is pure; this trait is where concurrency lives. Every
//! implementation must serialize [`GameRepository::update`] per game id so
//! two moves against the same game can never both read the same prior state.

use crate::db::DbError;
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tictactoe_rules::{GameState, InvariantViolation, Rejection, check_invariants};
use tracing::{debug, info, instrument, warn};

/// Identifier of a stored game.
pub type GameId = String;

/// A state transition to run under the repository's per-game lock.
pub type Transition<'a> = &'a (dyn Fn(&GameState) -> Result<GameState, Rejection> + Sync);

/// Failure of a repository operation.
#[derive(Debug, Clone, Display, Error)]
pub enum StoreError {
    /// No game is stored under the id.
    #[display("Game {} not found", id)]
    NotFound {
        /// The missing id.
        id: GameId,
    },

    /// A game is already stored under the id.
    #[display("Game {} already exists", id)]
    AlreadyExists {
        /// The duplicate id.
        id: GameId,
    },

    /// The state contradicts its own board and was not stored.
    #[display("Game {} not stored: {}", id, violation)]
    InvalidState {
        /// The id the state was offered under.
        id: GameId,
        /// What is wrong with it.
        violation: InvariantViolation,
    },

    /// The transition refused the move; nothing was written.
    #[display("Move rejected: {}", _0)]
    Rejected(Rejection),

    /// The backing store failed.
    #[display("{}", _0)]
    Storage(DbError),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::Storage(err)
    }
}

impl From<Rejection> for StoreError {
    fn from(rejection: Rejection) -> Self {
        StoreError::Rejected(rejection)
    }
}

/// Refuses states that every repository would fail to load back.
pub(crate) fn ensure_valid(id: &str, state: &GameState) -> Result<(), StoreError> {
    check_invariants(state).map_err(|violation| {
        warn!(game_id = id, %violation, "Refusing inconsistent state");
        StoreError::InvalidState {
            id: id.to_string(),
            violation,
        }
    })
}

/// Persistent home of canonical game states.
pub trait GameRepository: Send + Sync {
    /// Stores a new game.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyExists`] if `id` is taken,
    /// [`StoreError::InvalidState`] if `state` fails
    /// [`check_invariants`](tictactoe_rules::check_invariants).
    fn insert(&self, id: &str, state: &GameState) -> Result<(), StoreError>;

    /// Loads a game.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if nothing is stored under `id`.
    fn get(&self, id: &str) -> Result<GameState, StoreError>;

    /// Loads a game, runs `transition` on it and stores the result, all
    /// while holding exclusive access to that game.
    ///
    /// Returns the stored state. A rejected transition writes nothing.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if nothing is stored under `id`,
    /// [`StoreError::Rejected`] if the transition refused the move.
    fn update(&self, id: &str, transition: Transition<'_>) -> Result<GameState, StoreError>;
}

/// Process-local repository backed by a map behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<GameId, GameState>>,
}

impl InMemoryGameRepository {
    /// Creates an empty repository.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game repository");
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.games.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no game is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, state))]
    fn insert(&self, id: &str, state: &GameState) -> Result<(), StoreError> {
        ensure_valid(id, state)?;
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        if games.contains_key(id) {
            warn!(game_id = id, "Game already exists");
            return Err(StoreError::AlreadyExists { id: id.to_string() });
        }
        games.insert(id.to_string(), state.clone());
        debug!(game_id = id, "Game inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &str) -> Result<GameState, StoreError> {
        let games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        games.get(id).cloned().ok_or_else(|| {
            debug!(game_id = id, "Game not found");
            StoreError::NotFound { id: id.to_string() }
        })
    }

    #[instrument(skip(self, transition))]
    fn update(&self, id: &str, transition: Transition<'_>) -> Result<GameState, StoreError> {
        // Held across read, transition and write.
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        let current = games
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let next = transition(current).map_err(|rejection| {
            debug!(game_id = id, %rejection, "Transition rejected");
            StoreError::Rejected(rejection)
        })?;

        games.insert(id.to_string(), next.clone());
        debug!(game_id = id, is_over = next.is_over(), "Game updated");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_rules::{Cell, Mark, Player, apply_move};

    #[test]
    fn test_insert_then_get() {
        let repo = InMemoryGameRepository::new();
        let state = GameState::new(Player::One);
        repo.insert("a", &state).unwrap();
        assert_eq!(repo.get("a").unwrap(), state);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let repo = InMemoryGameRepository::new();
        repo.insert("a", &GameState::default()).unwrap();
        assert!(matches!(
            repo.insert("a", &GameState::default()),
            Err(StoreError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_inconsistent_state_is_refused() {
        let repo = InMemoryGameRepository::new();
        let full_but_ongoing = GameState::ongoing(
            Player::One,
            Cell::ALL.iter().map(|cell| (*cell, Player::Two)).collect(),
        );
        assert!(matches!(
            repo.insert("a", &full_but_ongoing),
            Err(StoreError::InvalidState {
                violation: InvariantViolation::OngoingBoardFull,
                ..
            })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_get_missing() {
        let repo = InMemoryGameRepository::new();
        assert!(matches!(repo.get("nope"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_rejected_update_writes_nothing() {
        let repo = InMemoryGameRepository::new();
        let state = GameState::new(Player::One);
        repo.insert("a", &state).unwrap();

        let mark = Mark::new(Player::Two, Cell::TopLeft);
        let result = repo.update("a", &|game| apply_move(game, mark));

        assert!(matches!(
            result,
            Err(StoreError::Rejected(Rejection::PlayerCantMove { player: Player::Two }))
        ));
        assert_eq!(repo.get("a").unwrap(), state);
    }

    #[test]
    fn test_accepted_update_is_stored() {
        let repo = InMemoryGameRepository::new();
        repo.insert("a", &GameState::new(Player::One)).unwrap();

        let mark = Mark::new(Player::One, Cell::TopLeft);
        let next = repo.update("a", &|game| apply_move(game, mark)).unwrap();

        assert_eq!(next.next_player(), Some(Player::Two));
        assert_eq!(repo.get("a").unwrap(), next);
    }
}
