//! Storage engine handle shared by all data access code.
//!
//! # Responsibility
//! - Own the single SQLite connection and its invalidation tracker.
//! - Run blocking SQLite work off the async executor.
//!
//! # Invariants
//! - All statements go through one connection guarded by a mutex.
//! - Async callers suspend while storage work runs; no executor worker blocks.

use super::invalidation::InvalidationTracker;
use super::open::open_with_config;
use super::DbResult;
use crate::config::{DatabaseConfig, DatabaseLocation};
use crate::dao::item_dao::ItemDao;
use log::warn;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Instant;

/// Slow storage calls above this threshold are logged.
const SLOW_OP_WARN_MS: u128 = 250;

/// The inventory storage engine: one connection plus change notification.
pub struct InventoryDatabase {
    conn: Arc<Mutex<Connection>>,
    invalidation: Arc<InvalidationTracker>,
    location: DatabaseLocation,
}

impl InventoryDatabase {
    /// Opens the database and applies migrations. Blocks the calling thread.
    pub fn open(config: &DatabaseConfig) -> DbResult<Self> {
        let conn = open_with_config(config)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            invalidation: Arc::new(InvalidationTracker::new()),
            location: config.location.clone(),
        })
    }

    /// Data access object bound to this engine.
    pub fn item_dao(self: &Arc<Self>) -> ItemDao {
        ItemDao::new(Arc::clone(self))
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    pub fn invalidation(&self) -> &InvalidationTracker {
        &self.invalidation
    }

    /// Runs a write on the blocking pool and invalidates the table there.
    ///
    /// `work` returns its value plus the number of rows it changed. The
    /// invalidation happens in the blocking task, so a caller that stops
    /// awaiting still leaves live queries notified of the committed write.
    pub(crate) async fn write<T, F>(&self, op: &'static str, work: F) -> DbResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> DbResult<(T, usize)> + Send + 'static,
    {
        let invalidation = Arc::clone(&self.invalidation);
        self.run(op, move |conn| {
            let (value, rows) = work(conn)?;
            if rows > 0 {
                invalidation.invalidate();
            }
            Ok(value)
        })
        .await
    }

    /// Runs `work` against the connection on the blocking pool.
    ///
    /// `op` names the call in slow-operation logs.
    pub(crate) async fn run<T, F>(&self, op: &'static str, work: F) -> DbResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> DbResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let started_at = Instant::now();
            let guard = conn.lock();
            let result = work(&*guard);
            drop(guard);

            let elapsed_ms = started_at.elapsed().as_millis();
            if elapsed_ms > SLOW_OP_WARN_MS {
                warn!("event=db_slow_op module=db status=ok op={op} duration_ms={elapsed_ms}");
            }
            result
        })
        .await?
    }
}

impl std::fmt::Debug for InventoryDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryDatabase")
            .field("location", &self.location)
            .field("version", &self.invalidation.version())
            .finish()
    }
}
