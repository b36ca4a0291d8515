//! Producer port: the opaque capability that computes plans, drafts, and
//! critiques.
//!
//! The orchestrator never looks inside these computations; it only consumes
//! their typed outputs. An implementation would typically wrap an LLM
//! backend, but nothing in the core assumes one.

use async_trait::async_trait;

use crate::domain::models::{CritiqueReport, SearchQuery, SourceDocument};

/// Error types for producer operations.
#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    /// The producer returned no usable content for the request.
    #[error("producer returned empty output: {0}")]
    EmptyOutput(String),

    /// The producer returned content that violates its contract.
    #[error("producer returned malformed output: {0}")]
    MalformedOutput(String),

    /// The backing implementation failed (transport, timeout, cancellation).
    #[error("producer backend failure: {0}")]
    Backend(String),
}

/// Port trait for the content-producing capability.
///
/// The three methods correspond to the three production kinds the pipeline
/// needs: a plan, a draft, and a critique.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a single handle can serve
/// concurrent runs.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Break a topic into an ordered list of search queries.
    ///
    /// Expected to return 3-5 queries; returning zero is a contract
    /// violation the plan step treats as a hard error.
    async fn plan(&self, topic: &str) -> Result<Vec<SearchQuery>, ProducerError>;

    /// Synthesize the gathered documents into a structured draft.
    async fn draft(
        &self,
        topic: &str,
        sources: &[SourceDocument],
    ) -> Result<String, ProducerError>;

    /// Review a draft: numeric quality score (0-100) plus free-text
    /// feedback.
    async fn critique(&self, topic: &str, draft: &str) -> Result<CritiqueReport, ProducerError>;
}
