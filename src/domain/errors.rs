//! Error taxonomy for workflow runs.
//!
//! Capability failures abort the run immediately; the critique retry loop is
//! a quality retry only and never re-runs a failed capability call.

use thiserror::Error;

use crate::domain::models::{RunState, Step};
use crate::domain::ports::{ProducerError, ProviderError, StoreError};

/// A failure surfaced to the caller of a workflow run.
///
/// Capability variants carry the step that was executing when the capability
/// failed.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The topic was empty or blank; rejected before the first step runs.
    #[error("topic must be non-empty")]
    InvalidTopic,

    /// The producer capability failed or returned unusable output.
    #[error("producer failed during {step}: {source}")]
    Producer {
        /// Step that was executing.
        step: Step,
        /// Underlying capability failure.
        #[source]
        source: ProducerError,
    },

    /// The search provider capability failed.
    #[error("search provider failed during {step}: {source}")]
    Provider {
        /// Step that was executing.
        step: Step,
        /// Underlying capability failure.
        #[source]
        source: ProviderError,
    },

    /// The result store capability failed.
    #[error("result store failed during {step}: {source}")]
    Store {
        /// Step that was executing.
        step: Step,
        /// Underlying capability failure.
        #[source]
        source: StoreError,
    },
}

impl WorkflowError {
    /// The step that was executing when the error occurred, if any.
    ///
    /// `None` for [`WorkflowError::InvalidTopic`], which predates the first
    /// step.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::InvalidTopic => None,
            Self::Producer { step, .. } | Self::Provider { step, .. } | Self::Store { step, .. } => {
                Some(*step)
            }
        }
    }
}

/// Convenience alias used throughout the services layer.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// An aborted run: the error plus whatever state had accumulated.
///
/// Partial progress is never silently discarded; the caller can inspect the
/// gathered documents, draft, and progress log up to the failure point.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunFailure {
    /// The failure that aborted the run.
    #[source]
    pub error: WorkflowError,
    /// State accumulated before the abort. Boxed to keep the error variant
    /// small on the result path.
    pub state: Box<RunState>,
}
