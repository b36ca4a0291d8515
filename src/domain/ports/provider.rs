//! Search provider port: resolves a query into an ordered list of documents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Source identifier (URL or title).
    pub source: String,
    /// Retrieved content.
    pub content: String,
}

/// Error types for search operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be reached.
    #[error("search transport failure: {0}")]
    Transport(String),

    /// The provider was reached but the lookup itself failed.
    #[error("search lookup failed for {query:?}: {reason}")]
    Lookup {
        /// The query that failed.
        query: String,
        /// Provider-reported reason.
        reason: String,
    },
}

/// Port trait for the search capability used by the gather step.
///
/// The gather step keeps only a prefix of the returned hits, so providers
/// should order results by relevance.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Resolve a query into an ordered sequence of hits.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError>;
}
