//! Items repository contract and its offline (SQLite) implementation.
//!
//! # Responsibility
//! - Provide a stable item API independent of storage technology.
//! - Forward the SQLite-backed variant straight to `ItemDao`.
//!
//! # Invariants
//! - `OfflineItemsRepository` adds no validation, transformation or caching.
//! - Duplicate-id inserts and writes to missing ids are not errors.

use crate::dao::item_dao::ItemDao;
use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Stream of repository snapshots. Dropping it cancels the subscription.
pub type ItemStream<T> = BoxStream<'static, RepoResult<T>>;

/// Error surfaced by any `ItemsRepository` implementation.
#[derive(Debug)]
pub enum RepoError {
    /// Local storage failure.
    Db(DbError),
    /// Failure reported by a non-local backend.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "item backend failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Repository interface consumed by the presentation layer.
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    /// All items sorted by name, re-emitted whenever the set changes.
    fn get_all_items_stream(&self) -> ItemStream<Vec<Item>>;

    /// The item with `id`, re-emitted whenever it changes; `None` when absent.
    fn get_item_stream(&self, id: ItemId) -> ItemStream<Option<Item>>;

    /// Stores a new item. Returns `None` when an item with that id exists.
    async fn insert_item(&self, item: &Item) -> RepoResult<Option<ItemId>>;

    async fn delete_item(&self, item: &Item) -> RepoResult<()>;

    /// Replaces the stored item having `item.id` with `item`.
    async fn update_item(&self, item: &Item) -> RepoResult<()>;
}

/// `ItemsRepository` backed by the local SQLite database.
#[derive(Debug, Clone)]
pub struct OfflineItemsRepository {
    item_dao: ItemDao,
}

impl OfflineItemsRepository {
    pub fn new(item_dao: ItemDao) -> Self {
        Self { item_dao }
    }
}

#[async_trait]
impl ItemsRepository for OfflineItemsRepository {
    fn get_all_items_stream(&self) -> ItemStream<Vec<Item>> {
        self.item_dao
            .get_all_items()
            .map(|snapshot| snapshot.map_err(RepoError::from))
            .boxed()
    }

    fn get_item_stream(&self, id: ItemId) -> ItemStream<Option<Item>> {
        self.item_dao
            .get_item(id)
            .map(|snapshot| snapshot.map_err(RepoError::from))
            .boxed()
    }

    async fn insert_item(&self, item: &Item) -> RepoResult<Option<ItemId>> {
        Ok(self.item_dao.insert(item).await?)
    }

    async fn delete_item(&self, item: &Item) -> RepoResult<()> {
        self.item_dao.delete(item).await?;
        Ok(())
    }

    async fn update_item(&self, item: &Item) -> RepoResult<()> {
        self.item_dao.update(item).await?;
        Ok(())
    }
}
