//! Application service: the glue between storage and the rules engine.
//!
//! Each use case loads state from the repository, lets the engine decide,
//! and persists the outcome. The engine never sees the repository and the
//! repository never interprets the rules.

use crate::id::GameIdGenerator;
use crate::repository::{GameId, GameRepository, StoreError};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tictactoe_rules::{GameState, Mark, Player, apply_move};
use tracing::{info, instrument};

/// A stored game together with its id, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameRecord {
    /// Game id.
    id: GameId,
    /// Current state.
    state: GameState,
}

/// Tic-tac-toe use cases over a repository.
#[derive(Clone)]
pub struct Application {
    repository: Arc<dyn GameRepository>,
    ids: Arc<dyn GameIdGenerator>,
    starting_player: Player,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("starting_player", &self.starting_player)
            .finish_non_exhaustive()
    }
}

impl Application {
    /// Creates an application over `repository`, drawing ids from `ids`.
    pub fn new(
        repository: Arc<dyn GameRepository>,
        ids: Arc<dyn GameIdGenerator>,
        starting_player: Player,
    ) -> Self {
        Self {
            repository,
            ids,
            starting_player,
        }
    }

    /// The player who moves first in new games.
    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    /// Starts a new game with the configured starting player.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the game can't be stored.
    #[instrument(skip(self))]
    pub fn new_game(&self) -> Result<GameRecord, StoreError> {
        self.new_game_starting_with(self.starting_player)
    }

    /// Starts a new game in which `player` moves first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the game can't be stored.
    #[instrument(skip(self))]
    pub fn new_game_starting_with(&self, player: Player) -> Result<GameRecord, StoreError> {
        let id = self.ids.generate();
        let state = GameState::new(player);
        self.repository.insert(&id, &state)?;
        info!(game_id = %id, starting_player = %player, "New game created");
        Ok(GameRecord::new(id, state))
    }

    /// Loads a game.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &str) -> Result<GameRecord, StoreError> {
        let state = self.repository.get(id)?;
        Ok(GameRecord::new(id.to_string(), state))
    }

    /// Applies `mark` to the game, persisting the new state on success.
    ///
    /// # Errors
    ///
    /// [`StoreError::Rejected`] if the rules refuse the mark,
    /// [`StoreError::NotFound`] for an unknown id.
    #[instrument(skip(self), fields(player = %mark.player, cell = %mark.cell))]
    pub fn add_mark(&self, id: &str, mark: Mark) -> Result<GameRecord, StoreError> {
        let state = self
            .repository
            .update(id, &|current| apply_move(current, mark))?;

        match &state {
            GameState::Ongoing { next_player, .. } => {
                info!(game_id = id, next_player = %next_player, "Mark accepted");
            }
            GameState::Over {
                winner: Some(winner),
                ..
            } => {
                info!(game_id = id, winner = %winner, "Game won");
            }
            GameState::Over { winner: None, .. } => {
                info!(game_id = id, "Game drawn");
            }
        }

        Ok(GameRecord::new(id.to_string(), state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryGameRepository;

    #[test]
    fn test_new_game_uses_starting_player() {
        let app = Application::new(
            Arc::new(InMemoryGameRepository::new()),
            Arc::new(|| "g1".to_string()),
            Player::Two,
        );
        assert_eq!(app.starting_player(), Player::Two);

        let game = app.new_game().unwrap();
        assert_eq!(game.state().next_player(), Some(app.starting_player()));
        assert_eq!(app.get_game("g1").unwrap(), game);
    }
}
