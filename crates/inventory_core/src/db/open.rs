//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from a `DatabaseConfig`.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.
//! - Open failures are reported once, with no retry.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::{DatabaseConfig, DatabaseLocation};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with_config(&DatabaseConfig::file(path.as_ref()))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with_config(&DatabaseConfig::in_memory())
}

/// Opens the database described by `config` and applies all pending migrations.
///
/// # Side effects
/// - Creates missing parent directories for file databases.
/// - Emits `db_open` logging events with duration and status.
pub fn open_with_config(config: &DatabaseConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = config.location.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect(&config.location) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    match bootstrap_connection(&mut conn, config.busy_timeout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn connect(location: &DatabaseLocation) -> DbResult<Connection> {
    match location {
        DatabaseLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Connection::open(path)?)
        }
        DatabaseLocation::InMemory => Ok(Connection::open_in_memory()?),
    }
}

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}
