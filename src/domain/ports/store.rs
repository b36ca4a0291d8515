//! Result store port: the durable topic-keyed cache behind lookup and
//! persist.

use async_trait::async_trait;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read failed.
    #[error("store read failed: {0}")]
    Read(String),

    /// A write failed.
    #[error("store write failed: {0}")]
    Write(String),
}

/// Port trait for the durable result cache.
///
/// `get` backs the lookup step's short-circuit; `put` backs the terminal
/// persist step. A missing entry is `Ok(None)`, not an error.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Fetch the cached result for a topic, if any.
    async fn get(&self, topic: &str) -> Result<Option<String>, StoreError>;

    /// Store (or replace) the result for a topic.
    async fn put(&self, topic: &str, content: &str) -> Result<(), StoreError>;
}
