//! Accumulated run state and the partial-update merge.
//!
//! A run threads a single [`RunState`] record through every step. Steps never
//! mutate the record directly; they return a [`StateDelta`] naming only the
//! fields they change, and the engine merges it via [`RunState::apply`].
//! Overwrite fields are last-write-wins; `gathered` and `progress_log` are
//! append-only and never shrink, including across critique retries.

use serde::{Deserialize, Serialize};

/// One planned search query with the planner's reasoning.
///
/// Immutable once the plan step produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The query text handed to the search provider.
    pub query: String,
    /// Why the planner considers this query worth running.
    pub rationale: String,
}

impl SearchQuery {
    /// Convenience constructor used by tests and producer adapters.
    pub fn new(query: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            rationale: rationale.into(),
        }
    }
}

/// A document returned by the search provider, tagged with its origin query.
///
/// Immutable once the gather step produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Source identifier (URL or title).
    pub source: String,
    /// Document content.
    pub content: String,
    /// The query text that surfaced this document.
    pub origin_query: String,
}

/// Reviewer output for a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CritiqueReport {
    /// Quality score on a 0-100 scale.
    pub score: u8,
    /// Free-text feedback on what is missing or incorrect.
    pub feedback: String,
    /// Whether the reviewer flagged claims unsupported by the sources.
    #[serde(default)]
    pub hallucination_risk: bool,
}

/// The single record threaded through a workflow run.
///
/// Created once per run with zero values (topic populated), merged after
/// every step, discarded when the run completes or errors. Never shared
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// The topic the run was started with. Set once, never mutated.
    pub topic: String,
    /// Ordered search queries. Set exactly once by the plan step.
    pub plan: Vec<SearchQuery>,
    /// Append-only gathered documents; grows monotonically across retries.
    pub gathered: Vec<SourceDocument>,
    /// Current draft text; last write wins.
    pub draft: String,
    /// Latest critique score, if a critique has run.
    pub critique_score: Option<u8>,
    /// Latest critique feedback, if a critique has run.
    pub critique_feedback: Option<String>,
    /// Number of critique passes completed so far.
    pub retry_count: u32,
    /// Index of the next plan query the gather step will run.
    pub query_cursor: usize,
    /// Whether the lookup step found a cached result.
    pub cache_hit: bool,
    /// Final output; set at most once, on terminal success.
    pub final_result: Option<String>,
    /// Append-only human-readable trace, never reordered.
    pub progress_log: Vec<String>,
}

impl RunState {
    /// Zero-valued state for a fresh run on `topic`.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            plan: Vec::new(),
            gathered: Vec::new(),
            draft: String::new(),
            critique_score: None,
            critique_feedback: None,
            retry_count: 0,
            query_cursor: 0,
            cache_hit: false,
            final_result: None,
            progress_log: Vec::new(),
        }
    }

    /// Merge a step's partial update into the state.
    ///
    /// Fields absent from the delta are left untouched. `gathered` is
    /// concatenated, never replaced.
    pub fn apply(&mut self, delta: StateDelta) {
        if let Some(plan) = delta.plan {
            self.plan = plan;
        }
        self.gathered.extend(delta.gathered);
        if let Some(draft) = delta.draft {
            self.draft = draft;
        }
        if let Some(score) = delta.critique_score {
            self.critique_score = Some(score);
        }
        if let Some(feedback) = delta.critique_feedback {
            self.critique_feedback = Some(feedback);
        }
        if let Some(count) = delta.retry_count {
            self.retry_count = count;
        }
        if let Some(cursor) = delta.query_cursor {
            self.query_cursor = cursor;
        }
        if let Some(hit) = delta.cache_hit {
            self.cache_hit = hit;
        }
        if let Some(result) = delta.final_result {
            self.final_result = Some(result);
        }
    }
}

/// A step's declared updates. Unset fields are left untouched by the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDelta {
    /// Replaces the plan (plan step only).
    pub plan: Option<Vec<SearchQuery>>,
    /// Documents to append to `gathered`.
    pub gathered: Vec<SourceDocument>,
    /// Replaces the draft.
    pub draft: Option<String>,
    /// Replaces the critique score.
    pub critique_score: Option<u8>,
    /// Replaces the critique feedback.
    pub critique_feedback: Option<String>,
    /// Replaces the retry count.
    pub retry_count: Option<u32>,
    /// Replaces the query cursor.
    pub query_cursor: Option<usize>,
    /// Replaces the cache-hit flag.
    pub cache_hit: Option<bool>,
    /// Sets the final result.
    pub final_result: Option<String>,
}

impl StateDelta {
    /// A delta that changes nothing (the defensive gather no-op).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the delta names no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str) -> SourceDocument {
        SourceDocument {
            source: source.to_string(),
            content: "content".to_string(),
            origin_query: "q".to_string(),
        }
    }

    #[test]
    fn test_new_state_is_zero_valued() {
        let state = RunState::new("rust async runtimes");
        assert_eq!(state.topic, "rust async runtimes");
        assert!(state.plan.is_empty());
        assert!(state.gathered.is_empty());
        assert!(state.draft.is_empty());
        assert_eq!(state.critique_score, None);
        assert_eq!(state.retry_count, 0);
        assert_eq!(state.query_cursor, 0);
        assert!(!state.cache_hit);
        assert_eq!(state.final_result, None);
        assert!(state.progress_log.is_empty());
    }

    #[test]
    fn test_apply_overwrites_named_fields_only() {
        let mut state = RunState::new("t");
        state.draft = "first".to_string();
        state.critique_score = Some(40);

        state.apply(StateDelta {
            draft: Some("second".to_string()),
            ..Default::default()
        });

        assert_eq!(state.draft, "second");
        // Untouched fields survive the merge
        assert_eq!(state.critique_score, Some(40));
    }

    #[test]
    fn test_apply_concatenates_gathered() {
        let mut state = RunState::new("t");
        state.apply(StateDelta {
            gathered: vec![doc("a"), doc("b")],
            ..Default::default()
        });
        state.apply(StateDelta {
            gathered: vec![doc("c")],
            ..Default::default()
        });

        let sources: Vec<&str> = state.gathered.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_delta_is_a_no_op() {
        let mut state = RunState::new("t");
        state.plan = vec![SearchQuery::new("q1", "r1")];
        state.query_cursor = 1;
        let before = state.clone();

        assert!(StateDelta::empty().is_empty());
        state.apply(StateDelta::empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let mut state = RunState::new("topic");
        state.plan = vec![SearchQuery::new("q1", "r1")];
        state.gathered = vec![doc("https://example.com")];
        state.critique_score = Some(85);
        state.retry_count = 1;

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: RunState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_critique_report_default_hallucination_flag() {
        let report: CritiqueReport =
            serde_json::from_str(r#"{"score": 90, "feedback": "solid"}"#).unwrap();
        assert!(!report.hallucination_risk);
    }
}
