//! Database models for stored games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tictactoe_rules::{GameState, check_invariants};
use tracing::{instrument, warn};

use crate::db::{DbError, DbErrorKind, schema};

/// Stored game row. `state` holds the game state as JSON.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: String,
    state: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Parses the stored JSON into a [`GameState`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the JSON is malformed or describes a state
    /// that legal play could never reach.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn decode(&self) -> Result<GameState, DbError> {
        let state: GameState = serde_json::from_str(&self.state).map_err(|e| {
            warn!(error = %e, "Stored game state doesn't parse");
            DbError::new(DbErrorKind::CorruptRow, format!("game '{}': {}", self.id, e))
        })?;
        check_invariants(&state).map_err(|violation| {
            warn!(%violation, "Stored game state is corrupt");
            DbError::new(DbErrorKind::CorruptRow, format!("game '{}': {}", self.id, violation))
        })?;
        Ok(state)
    }
}

/// Insertable row for a new game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    id: String,
    state: String,
}

/// Encodes a state as the JSON stored in the `state` column.
///
/// # Errors
///
/// Returns [`DbError`] if serialization fails.
#[instrument(skip(state))]
pub fn encode(state: &GameState) -> Result<String, DbError> {
    Ok(serde_json::to_string(state)?)
}
