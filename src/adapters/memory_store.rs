//! In-memory result store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::ports::{ResultStore, StoreError};

/// A process-local [`ResultStore`] backed by a map.
///
/// Useful for tests and for embedding the pipeline without durable storage.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryResultStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored topics.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn get(&self, topic: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(topic).cloned())
    }

    async fn put(&self, topic: &str, content: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(topic.to_string(), content.to_string());
        Ok(())
    }
}
