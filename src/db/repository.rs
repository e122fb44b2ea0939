//! SQLite-backed game repository.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictactoe_rules::GameState;
use tracing::{debug, info, instrument, warn};

use crate::db::models::{GameRow, NewGameRow, encode};
use crate::db::{DbError, DbErrorKind, schema};
use crate::repository::{GameRepository, StoreError, Transition, ensure_valid};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        StoreError::Storage(DbError::from(err))
    }
}

/// Game repository stored in a SQLite database.
///
/// Each operation opens its own connection. Updates run in an IMMEDIATE
/// transaction, so the write lock is taken before the current state is read
/// and concurrent moves queue behind each other.
#[derive(Debug, Clone)]
pub struct SqliteGameRepository {
    database_url: String,
}

impl SqliteGameRepository {
    /// Opens the database at `database_url` and applies pending migrations.
    ///
    /// The file is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database can't be opened or migrated.
    #[instrument(skip(database_url), fields(database_url = %database_url))]
    pub fn open(database_url: String) -> Result<Self, DbError> {
        info!(path = %database_url, "Opening game database");
        let repo = Self { database_url };

        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");

        Ok(repo)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.database_url, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.database_url).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("can't open '{}': {}", self.database_url, e),
            )
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))
            .map_err(|e| DbError::new(DbErrorKind::Connection, e.to_string()))?;
        Ok(conn)
    }

    /// Loads the row for `id` on an existing connection.
    fn find(conn: &mut SqliteConnection, id: &str) -> Result<Option<GameRow>, diesel::result::Error> {
        schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first(conn)
            .optional()
    }
}

impl GameRepository for SqliteGameRepository {
    #[instrument(skip(self, state))]
    fn insert(&self, id: &str, state: &GameState) -> Result<(), StoreError> {
        ensure_valid(id, state)?;
        let mut conn = self.connection()?;
        let row = NewGameRow::new(id.to_string(), encode(state)?);

        match diesel::insert_into(schema::games::table)
            .values(&row)
            .execute(&mut conn)
        {
            Ok(_) => {
                info!(game_id = id, "Game inserted");
                Ok(())
            }
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                warn!(game_id = id, "Game already exists");
                Err(StoreError::AlreadyExists { id: id.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    fn get(&self, id: &str) -> Result<GameState, StoreError> {
        let mut conn = self.connection()?;
        match Self::find(&mut conn, id)? {
            Some(row) => {
                debug!(game_id = id, updated_at = %row.updated_at(), "Game loaded");
                Ok(row.decode()?)
            }
            None => {
                debug!(game_id = id, "Game not found");
                Err(StoreError::NotFound { id: id.to_string() })
            }
        }
    }

    #[instrument(skip(self, transition))]
    fn update(&self, id: &str, transition: Transition<'_>) -> Result<GameState, StoreError> {
        let mut conn = self.connection()?;

        conn.immediate_transaction::<_, StoreError, _>(|conn| {
            let row = Self::find(conn, id)?.ok_or_else(|| {
                debug!(game_id = id, "Game not found");
                StoreError::NotFound { id: id.to_string() }
            })?;
            let current = row.decode()?;

            let next = transition(&current).map_err(|rejection| {
                debug!(game_id = id, %rejection, "Transition rejected");
                StoreError::Rejected(rejection)
            })?;

            diesel::update(schema::games::table.find(id))
                .set((
                    schema::games::state.eq(encode(&next)?),
                    schema::games::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            info!(game_id = id, is_over = next.is_over(), "Game updated");
            Ok(next)
        })
    }
}
