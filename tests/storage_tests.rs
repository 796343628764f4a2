//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use dailyqr::config::DatabaseConfig;
use dailyqr::storage::backend::{SeaOrmStorage, connect_sqlite, run_migrations};
use dailyqr::storage::{Entry, NewEntry};

fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .checked_add_days(Days::new(n))
        .unwrap()
}

fn draft(target: &str) -> NewEntry {
    NewEntry {
        target: target.to_string(),
        comment: format!("comment for {}", target),
        visibility: String::new(),
    }
}

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };

    let storage = SeaOrmStorage::new(&config, "sqlite")
        .await
        .expect("Failed to create storage");
    (storage, temp_dir)
}

/// Entries on day(0), day(1), day(5)
async fn seeded_storage() -> (SeaOrmStorage, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    for (target, n) in [("https://a.test", 0), ("https://b.test", 1), ("https://c.test", 5)] {
        storage
            .append_entry(&draft(target), |_| Ok(day(n)))
            .await
            .expect("insert");
    }
    (storage, dir)
}

fn ids(entries: &[Entry]) -> Vec<i64> {
    entries.iter().map(|e| e.id).collect()
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let (storage, _dir) = create_temp_storage().await;
    run_migrations(storage.get_db())
        .await
        .expect("second migration run");
}

#[tokio::test]
async fn test_connect_sqlite_creates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.sqlite");
    let db = connect_sqlite(path.to_str().unwrap()).await.unwrap();
    run_migrations(&db).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_append_assigns_ids_and_fields() {
    let (storage, _dir) = seeded_storage().await;

    let entry = storage.get(2).await.unwrap().expect("entry 2");
    assert_eq!(entry.active_at, day(1));
    assert_eq!(entry.target.as_deref(), Some("https://b.test"));
    assert_eq!(entry.comment, "comment for https://b.test");

    assert!(storage.get(4).await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_passes_latest_day_to_scheduler() {
    let (storage, _dir) = seeded_storage().await;

    let mut seen = None;
    storage
        .append_entry(&draft("https://d.test"), |latest| {
            seen = latest;
            Ok(day(6))
        })
        .await
        .unwrap();
    assert_eq!(seen, Some(day(5)));
}

#[tokio::test]
async fn test_empty_table_passes_none() {
    let (storage, _dir) = create_temp_storage().await;

    let mut seen = Some(day(0));
    storage
        .append_entry(&draft("https://a.test"), |latest| {
            seen = latest;
            Ok(day(0))
        })
        .await
        .unwrap();
    assert_eq!(seen, None);
}

#[tokio::test]
async fn test_failed_schedule_inserts_nothing() {
    let (storage, _dir) = create_temp_storage().await;

    let result = storage
        .append_entry(&draft("https://a.test"), |_| {
            Err(dailyqr::errors::DailyQrError::validation("no"))
        })
        .await;
    assert!(result.is_err());
    assert!(storage.find_most_recent().await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_active_at_and_latest_before() {
    let (storage, _dir) = seeded_storage().await;

    assert_eq!(storage.find_by_active_at(day(1)).await.unwrap().unwrap().id, 2);
    assert!(storage.find_by_active_at(day(3)).await.unwrap().is_none());

    assert_eq!(
        storage.find_latest_before(day(3)).await.unwrap().unwrap().id,
        2
    );
    assert_eq!(
        storage.find_latest_before(day(1)).await.unwrap().unwrap().id,
        1
    );
    assert!(storage.find_latest_before(day(0)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_most_recent() {
    let (storage, _dir) = seeded_storage().await;
    assert_eq!(storage.find_most_recent().await.unwrap().unwrap().id, 3);
}

#[tokio::test]
async fn test_list_through_and_after() {
    let (storage, _dir) = seeded_storage().await;

    assert_eq!(ids(&storage.list_through(day(1)).await.unwrap()), vec![1, 2]);
    assert_eq!(ids(&storage.list_after(day(1)).await.unwrap()), vec![3]);
    assert_eq!(ids(&storage.list_through(day(9)).await.unwrap()), vec![1, 2, 3]);
    assert!(storage.list_after(day(9)).await.unwrap().is_empty());
}
