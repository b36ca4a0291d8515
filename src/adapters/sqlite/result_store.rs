//! SQLite implementation of the result store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::domain::ports::{ResultStore, StoreError};

/// Durable [`ResultStore`] keyed by topic.
#[derive(Debug, Clone)]
pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    /// Wrap an existing pool. Call [`SqliteResultStore::init_schema`] once
    /// before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the cache table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS cached_results (
                topic TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn get(&self, topic: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT content FROM cached_results WHERE topic = ?")
            .bind(topic)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        row.map(|r| r.try_get::<String, _>("content"))
            .transpose()
            .map_err(|e| StoreError::Read(e.to_string()))
    }

    async fn put(&self, topic: &str, content: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO cached_results (topic, content, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(topic) DO UPDATE SET
                   content = excluded.content,
                   updated_at = excluded.updated_at"#,
        )
        .bind(topic)
        .bind(content)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}
