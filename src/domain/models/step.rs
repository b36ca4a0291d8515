//! Workflow step identifiers.
//!
//! The pipeline is an explicit state machine: every reachable step is a
//! variant here, and the transition policy in `services::transition` is the
//! only place that decides what runs next.

use serde::{Deserialize, Serialize};

/// A named step of the drafting pipeline.
///
/// ```text
/// Lookup → Plan → Gather (loop) → Draft → Critique → Persist
///       ↘ (cache hit: terminal)        ↖___________↙ (quality retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Check the result store for a cached result.
    Lookup,
    /// Produce the ordered list of search queries.
    Plan,
    /// Run the query at the cursor and append its documents.
    Gather,
    /// Synthesize the gathered documents into a draft.
    Draft,
    /// Score the draft and decide whether more gathering is needed.
    Critique,
    /// Write the accepted draft to the result store.
    Persist,
}

impl Step {
    /// The entry step of every run.
    pub const ENTRY: Self = Self::Lookup;

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lookup => "lookup",
            Self::Plan => "plan",
            Self::Gather => "gather",
            Self::Draft => "draft",
            Self::Critique => "critique",
            Self::Persist => "persist",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a transition-policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Run the named step next.
    Next(Step),
    /// The run is finished; no further steps.
    Complete,
}
