//! Core persistence for the inventory app.
//! Items live in one SQLite table and reach the UI through live streams.

pub mod config;
pub mod container;
pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{DatabaseConfig, DatabaseLocation, DEFAULT_DB_FILE_NAME};
pub use container::{AppContainer, AppDataContainer};
pub use dao::item_dao::ItemDao;
pub use dao::LiveQuery;
pub use db::{DatabaseProvider, DatabaseState, DbError, DbResult, InventoryDatabase};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{Item, ItemId, UNASSIGNED_ITEM_ID};
pub use repo::items_repository::{
    ItemStream, ItemsRepository, OfflineItemsRepository, RepoError, RepoResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
