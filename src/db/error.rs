//! Game store errors.

use derive_more::{Display, Error};

/// Which stage of a store operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Opening the database file or configuring the connection.
    #[display("connection")]
    Connection,
    /// Applying the embedded schema migrations.
    #[display("migration")]
    Migration,
    /// A diesel query or transaction.
    #[display("query")]
    Query,
    /// Serializing a game state for the `state` column.
    #[display("encoding")]
    Encoding,
    /// A stored row that doesn't hold a usable game state.
    #[display("corrupt row")]
    CorruptRow,
}

/// Failure of the SQLite game store, tagged with the code location that
/// raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Game store {} error: {} ({}:{})", kind, message, file, line)]
pub struct DbError {
    /// Failing stage.
    pub kind: DbErrorKind,
    /// What went wrong.
    pub message: String,
    /// Source file of the caller.
    pub file: &'static str,
    /// Line of the caller.
    pub line: u32,
}

impl DbError {
    /// Records `message` under `kind` at the caller's location.
    #[track_caller]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            file: caller.file(),
            line: caller.line(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(DbErrorKind::Encoding, err.to_string())
    }
}
