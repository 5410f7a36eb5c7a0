//! Database lifecycle: one engine instance per provider, opened lazily.
//!
//! # Responsibility
//! - Construct the `InventoryDatabase` on first request.
//! - Hand the same instance to every later requester.
//!
//! # Invariants
//! - Concurrent first requests race on one initialization; exactly one engine
//!   is opened and all racers receive it.
//! - Once initialized, `get` is a single atomic load plus an `Arc` clone.
//! - A failed open leaves the provider uninitialized. There is no teardown.

use super::engine::InventoryDatabase;
use super::DbResult;
use crate::config::DatabaseConfig;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Observable lifecycle state of a `DatabaseProvider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseState {
    Uninitialized,
    Initialized,
}

/// Owns the lazily opened storage engine for the composition root.
#[derive(Debug)]
pub struct DatabaseProvider {
    config: DatabaseConfig,
    instance: OnceCell<Arc<InventoryDatabase>>,
}

impl DatabaseProvider {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            instance: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn state(&self) -> DatabaseState {
        if self.instance.initialized() {
            DatabaseState::Initialized
        } else {
            DatabaseState::Uninitialized
        }
    }

    /// Returns the engine, opening it on first call.
    ///
    /// # Errors
    /// - Propagates open/migration failures unchanged. The next call tries
    ///   again from the uninitialized state.
    pub async fn get(&self) -> DbResult<Arc<InventoryDatabase>> {
        let instance = self
            .instance
            .get_or_try_init(|| open_instance(self.config.clone()))
            .await?;
        Ok(Arc::clone(instance))
    }
}

async fn open_instance(config: DatabaseConfig) -> DbResult<Arc<InventoryDatabase>> {
    let mode = config.location.mode();
    info!("event=db_acquire module=db status=start mode={mode}");

    let opened = tokio::task::spawn_blocking(move || InventoryDatabase::open(&config)).await?;
    match opened {
        Ok(database) => {
            info!("event=db_acquire module=db status=ok mode={mode}");
            Ok(Arc::new(database))
        }
        Err(err) => {
            error!("event=db_acquire module=db status=error mode={mode} error={err}");
            Err(err)
        }
    }
}
