//! SQLite storage bootstrap, engine handle and lifecycle.
//!
//! # Responsibility
//! - Open and configure SQLite connections for inventory core.
//! - Apply schema migrations in deterministic order.
//! - Own the single storage engine instance handed to data access code.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write items before migrations succeed.
//! - At most one `InventoryDatabase` is constructed per `DatabaseProvider`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod engine;
mod invalidation;
pub mod migrations;
mod open;
mod provider;

pub use engine::InventoryDatabase;
pub use invalidation::InvalidationTracker;
pub use open::{open_db, open_db_in_memory, open_with_config};
pub use provider::{DatabaseProvider, DatabaseState};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A blocking storage task panicked or was cancelled before finishing.
    Worker(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "storage io error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Worker(message) => write!(f, "storage worker failed: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Worker(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<tokio::task::JoinError> for DbError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Worker(value.to_string())
    }
}
