//! Integration tests for the SQLite result store.

use draftsmith::adapters::sqlite::{create_pool, create_test_pool};
use draftsmith::{ResultStore, SqliteResultStore};

async fn setup() -> SqliteResultStore {
    let pool = create_test_pool().await.unwrap();
    let store = SqliteResultStore::new(pool);
    store.init_schema().await.unwrap();
    store
}

#[tokio::test]
async fn test_get_miss_returns_none() {
    let store = setup().await;
    assert_eq!(store.get("unknown topic").await.unwrap(), None);
}

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let store = setup().await;
    store.put("rust async", "# Report\n\nbody").await.unwrap();
    assert_eq!(
        store.get("rust async").await.unwrap().as_deref(),
        Some("# Report\n\nbody")
    );
}

#[tokio::test]
async fn test_put_upserts_existing_topic() {
    let store = setup().await;
    store.put("topic", "first").await.unwrap();
    store.put("topic", "second").await.unwrap();
    assert_eq!(store.get("topic").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn test_topics_are_isolated() {
    let store = setup().await;
    store.put("a", "result a").await.unwrap();
    store.put("b", "result b").await.unwrap();
    assert_eq!(store.get("a").await.unwrap().as_deref(), Some("result a"));
    assert_eq!(store.get("b").await.unwrap().as_deref(), Some("result b"));
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let store = setup().await;
    store.init_schema().await.unwrap();
    store.put("topic", "content").await.unwrap();
    assert!(store.get("topic").await.unwrap().is_some());
}

#[tokio::test]
async fn test_file_backed_pool_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/nested/cache.db", dir.path().display());

    let pool = create_pool(&url, None).await.unwrap();
    let store = SqliteResultStore::new(pool);
    store.init_schema().await.unwrap();

    store.put("durable topic", "persisted").await.unwrap();
    assert_eq!(
        store.get("durable topic").await.unwrap().as_deref(),
        Some("persisted")
    );
}
