//! Dependency container: the single composition point for item access.
//!
//! # Responsibility
//! - Wire `DatabaseProvider`, `ItemDao` and `OfflineItemsRepository`.
//! - Hand one shared repository to the rest of the app.
//!
//! # Invariants
//! - Nothing is opened until the repository is first requested.
//! - Every successful request returns the same repository instance.

use crate::config::DatabaseConfig;
use crate::db::DatabaseProvider;
use crate::repo::items_repository::{ItemsRepository, OfflineItemsRepository, RepoResult};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// App-level dependency container.
#[async_trait]
pub trait AppContainer: Send + Sync {
    /// Shared items repository, constructed on first access.
    async fn items_repository(&self) -> RepoResult<Arc<dyn ItemsRepository>>;
}

/// Container backed by the local SQLite database.
#[derive(Debug)]
pub struct AppDataContainer {
    database: DatabaseProvider,
    items_repository: OnceCell<Arc<OfflineItemsRepository>>,
}

impl AppDataContainer {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            database: DatabaseProvider::new(config),
            items_repository: OnceCell::new(),
        }
    }

    pub fn database(&self) -> &DatabaseProvider {
        &self.database
    }

    async fn build_items_repository(&self) -> RepoResult<Arc<OfflineItemsRepository>> {
        let database = self.database.get().await?;
        info!(
            "event=container_wire module=container status=ok component=items_repository mode={}",
            database.location().mode()
        );
        Ok(Arc::new(OfflineItemsRepository::new(database.item_dao())))
    }
}

#[async_trait]
impl AppContainer for AppDataContainer {
    async fn items_repository(&self) -> RepoResult<Arc<dyn ItemsRepository>> {
        let repository = self
            .items_repository
            .get_or_try_init(|| self.build_items_repository())
            .await?;
        Ok(Arc::clone(repository) as Arc<dyn ItemsRepository>)
    }
}
