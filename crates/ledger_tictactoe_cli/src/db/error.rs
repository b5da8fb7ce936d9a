//! Errors raised by the SQLite game store.

use derive_more::{Display, Error};
use ledger_tictactoe::StoreError;
use tracing::{instrument, warn};

/// Stage of store access that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DbErrorKind {
    /// The database path was rejected before connecting.
    #[display("Path check")]
    InvalidPath,
    /// Opening the SQLite file or configuring the connection.
    #[display("Connection")]
    Connection,
    /// Applying embedded schema migrations.
    #[display("Migration")]
    Migration,
    /// A statement or transaction.
    #[display("Query")]
    Query,
    /// A stored row does not decode into a reachable game.
    #[display("Row decoding")]
    MalformedRow,
}

/// SQLite store error, tagged with the failing stage and the call site.
#[derive(Debug, Clone, Display, Error)]
#[display("{} failed: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failing stage.
    pub kind: DbErrorKind,
    /// Human-readable detail.
    pub message: String,
    /// Line of the call site.
    pub line: u32,
    /// File of the call site.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error of `kind` located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// A column of a stored row holds a value no game can have.
    #[track_caller]
    pub fn malformed(column: &str, detail: impl std::fmt::Display) -> Self {
        let err = Self::new(DbErrorKind::MalformedRow, format!("{}: {}", column, detail));
        warn!(column, error = %err.message, "Malformed game row");
        err
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        StoreError::new(err.to_string())
    }
}
