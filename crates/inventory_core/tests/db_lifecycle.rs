use futures_util::StreamExt;
use inventory_core::{
    DatabaseConfig, DatabaseLocation, DatabaseProvider, DatabaseState, DbError, Item,
};
use rusqlite::Connection;
use std::sync::Arc;

#[tokio::test]
async fn provider_is_lazy_until_first_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::in_data_dir(dir.path());
    let provider = DatabaseProvider::new(config.clone());

    assert_eq!(provider.state(), DatabaseState::Uninitialized);
    let DatabaseLocation::File(path) = &config.location else {
        panic!("expected a file location");
    };
    assert!(!path.exists());

    provider.get().await.unwrap();
    assert_eq!(provider.state(), DatabaseState::Initialized);
    assert!(path.exists());
}

#[tokio::test]
async fn repeated_get_returns_same_instance() {
    let provider = DatabaseProvider::new(DatabaseConfig::in_memory());

    let first = provider.get().await.unwrap();
    let second = provider.get().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_acquisition_yields_one_instance() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(DatabaseProvider::new(DatabaseConfig::in_data_dir(
        dir.path(),
    )));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let provider = Arc::clone(&provider);
        handles.push(tokio::spawn(async move { provider.get().await.unwrap() }));
    }

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.unwrap());
    }

    let first = &instances[0];
    assert!(instances
        .iter()
        .all(|instance| Arc::ptr_eq(first, instance)));
}

#[tokio::test]
async fn in_memory_instance_shares_data_across_daos() {
    let provider = DatabaseProvider::new(DatabaseConfig::in_memory());

    let writer = provider.get().await.unwrap().item_dao();
    let reader = provider.get().await.unwrap().item_dao();
    let id = writer
        .insert(&Item::new("Shared", 1.0, 1))
        .await
        .unwrap()
        .unwrap();

    let loaded = reader.get_item(id).next().await.unwrap().unwrap();
    assert_eq!(loaded.map(|item| item.name), Some("Shared".to_string()));
}

#[tokio::test]
async fn open_failure_propagates_and_leaves_provider_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 2;").unwrap();
    drop(conn);

    let provider = DatabaseProvider::new(DatabaseConfig::file(&path));
    let err = provider.get().await.unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version: 2, .. }
    ));
    assert_eq!(provider.state(), DatabaseState::Uninitialized);
}
