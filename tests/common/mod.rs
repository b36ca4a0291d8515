//! Scripted capability doubles shared by the integration tests.
//!
//! Each double counts its invocations so tests can assert which
//! capabilities a run touched (cache-hit short-circuit, idempotence).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use draftsmith::{
    CritiqueReport, Producer, ProducerError, ProviderError, SearchHit, SearchProvider, SearchQuery,
    SourceDocument,
};

/// Producer double: fixed plan, scripted critique scores, deterministic
/// drafts that embed the pass number.
pub struct ScriptedProducer {
    query_count: usize,
    scores: Mutex<VecDeque<u8>>,
    pub plan_calls: AtomicUsize,
    pub draft_calls: AtomicUsize,
    pub critique_calls: AtomicUsize,
}

impl ScriptedProducer {
    pub fn new(query_count: usize, scores: &[u8]) -> Self {
        Self {
            query_count,
            scores: Mutex::new(scores.iter().copied().collect()),
            plan_calls: AtomicUsize::new(0),
            draft_calls: AtomicUsize::new(0),
            critique_calls: AtomicUsize::new(0),
        }
    }

    /// Total invocations across all three kinds.
    pub fn total_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
            + self.draft_calls.load(Ordering::SeqCst)
            + self.critique_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Producer for ScriptedProducer {
    async fn plan(&self, topic: &str) -> Result<Vec<SearchQuery>, ProducerError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        Ok((0..self.query_count)
            .map(|i| SearchQuery::new(format!("{topic} aspect {i}"), format!("covers facet {i}")))
            .collect())
    }

    async fn draft(
        &self,
        topic: &str,
        sources: &[SourceDocument],
    ) -> Result<String, ProducerError> {
        let pass = self.draft_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!(
            "# {topic}\n\nSynthesized from {} sources (pass {pass}).",
            sources.len()
        ))
    }

    async fn critique(&self, _topic: &str, _draft: &str) -> Result<CritiqueReport, ProducerError> {
        self.critique_calls.fetch_add(1, Ordering::SeqCst);
        let score = self
            .scores
            .lock()
            .unwrap()
            .pop_front()
            .expect("critique score script exhausted");
        Ok(CritiqueReport {
            score,
            feedback: format!("scored {score}"),
            hallucination_risk: false,
        })
    }
}

/// Provider double: a fixed number of hits per query, with an optional
/// injected failure on the nth call (1-based).
pub struct StubProvider {
    hits_per_query: usize,
    fail_on_call: Option<usize>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(hits_per_query: usize) -> Self {
        Self {
            hits_per_query,
            fail_on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on_call(hits_per_query: usize, call: usize) -> Self {
        Self {
            hits_per_query,
            fail_on_call: Some(call),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(ProviderError::Transport("injected search outage".to_string()));
        }
        Ok((0..self.hits_per_query)
            .map(|i| SearchHit {
                source: format!("https://example.com/{}/{i}", query.replace(' ', "-")),
                content: format!("evidence for {query}"),
            })
            .collect())
    }
}
