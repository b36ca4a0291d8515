//! Draftsmith - Autonomous Drafting Pipeline
//!
//! Draftsmith orchestrates a multi-step content-generation workflow: given a
//! topic it plans sub-queries, gathers documents per query, drafts a
//! document, critiques it, optionally loops back for more material, and
//! persists the accepted result. The crate owns the orchestration only; the
//! planning/drafting/critiquing computation, the search lookup, and the
//! durable cache are injected capabilities.
//!
//! # Architecture
//!
//! Hexagonal layering, smallest pieces first:
//!
//! - **Domain** (`domain`): run state, step identifiers, capability ports,
//!   error taxonomy
//! - **Services** (`services`): the step registry, the pure transition
//!   policy, the engine driving the step loop, and the progress bus
//! - **Adapters** (`adapters`): in-memory and SQLite result stores
//! - **Infrastructure** (`infrastructure`): configuration loading, logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use draftsmith::{Config, MemoryResultStore, WorkflowEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = WorkflowEngine::new(
//!         my_producer,                          // Arc<dyn Producer>
//!         my_search,                            // Arc<dyn SearchProvider>
//!         Arc::new(MemoryResultStore::new()),
//!         &Config::default(),
//!     );
//!     let report = engine.run_workflow("rust async runtimes").await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{MemoryResultStore, SqliteResultStore};
pub use domain::errors::{RunFailure, WorkflowError, WorkflowResult};
pub use domain::models::{
    Config, CritiqueReport, DatabaseConfig, GatherConfig, LoggingConfig, ProgressConfig,
    QualityPolicy, RunState, SearchQuery, SourceDocument, StateDelta, Step, Transition,
};
pub use domain::ports::{
    Producer, ProducerError, ProviderError, ResultStore, SearchHit, SearchProvider, StoreError,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ProgressBus, ProgressEvent, ProgressPayload, SequenceNumber, WorkflowEngine};
