//! Step registry: the named state-transformation units of the pipeline.
//!
//! Each step reads only the [`RunState`] it is given and returns a
//! [`StepOutput`] — the fields it changes plus the log lines it emitted.
//! Steps hold no hidden state; capability handles are the only
//! collaborators, and a capability failure propagates as a
//! [`WorkflowError`] wrapping the step name.

use std::sync::Arc;

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::{GatherConfig, RunState, SourceDocument, StateDelta, Step};
use crate::domain::ports::{Producer, ProducerError, ResultStore, SearchProvider};

/// A step's declared updates plus its emitted log lines.
#[derive(Debug, Clone, Default)]
pub struct StepOutput {
    /// Fields the step changes; merged by the engine.
    pub delta: StateDelta,
    /// Human-readable lines appended to the run's progress log.
    pub log_lines: Vec<String>,
}

/// Executes steps against the injected capabilities.
///
/// One instance serves any number of sequential step invocations; it keeps
/// no per-run state.
pub struct StepRunner {
    producer: Arc<dyn Producer>,
    provider: Arc<dyn SearchProvider>,
    store: Arc<dyn ResultStore>,
    gather: GatherConfig,
}

impl StepRunner {
    /// Wire a runner with the three capability handles.
    pub fn new(
        producer: Arc<dyn Producer>,
        provider: Arc<dyn SearchProvider>,
        store: Arc<dyn ResultStore>,
        gather: GatherConfig,
    ) -> Self {
        Self {
            producer,
            provider,
            store,
            gather,
        }
    }

    /// Dispatch one step.
    pub async fn execute(&self, step: Step, state: &RunState) -> WorkflowResult<StepOutput> {
        match step {
            Step::Lookup => self.lookup(state).await,
            Step::Plan => self.plan(state).await,
            Step::Gather => self.gather(state).await,
            Step::Draft => self.draft(state).await,
            Step::Critique => self.critique(state).await,
            Step::Persist => self.persist(state).await,
        }
    }

    /// Check the result store for a cached result.
    async fn lookup(&self, state: &RunState) -> WorkflowResult<StepOutput> {
        let mut log_lines = vec![format!("Checking cache for topic: {}", state.topic)];

        let cached = self
            .store
            .get(&state.topic)
            .await
            .map_err(|source| WorkflowError::Store {
                step: Step::Lookup,
                source,
            })?;

        let delta = match cached {
            Some(content) => {
                log_lines.push("Cache hit; returning stored result.".to_string());
                StateDelta {
                    cache_hit: Some(true),
                    final_result: Some(content),
                    ..Default::default()
                }
            }
            None => {
                log_lines.push("No cached result; proceeding to plan.".to_string());
                StateDelta {
                    cache_hit: Some(false),
                    ..Default::default()
                }
            }
        };

        Ok(StepOutput { delta, log_lines })
    }

    /// Ask the producer for the ordered query plan.
    async fn plan(&self, state: &RunState) -> WorkflowResult<StepOutput> {
        let queries = self
            .producer
            .plan(&state.topic)
            .await
            .map_err(|source| WorkflowError::Producer {
                step: Step::Plan,
                source,
            })?;

        if queries.is_empty() {
            return Err(WorkflowError::Producer {
                step: Step::Plan,
                source: ProducerError::EmptyOutput("planner returned no queries".to_string()),
            });
        }

        let log_lines = vec![format!("Generated {} search queries.", queries.len())];
        Ok(StepOutput {
            delta: StateDelta {
                plan: Some(queries),
                query_cursor: Some(0),
                ..Default::default()
            },
            log_lines,
        })
    }

    /// Run the plan query at the cursor and append its documents.
    async fn gather(&self, state: &RunState) -> WorkflowResult<StepOutput> {
        let cursor = state.query_cursor;

        // The transition policy never routes here with an exhausted cursor;
        // if it happens anyway, log and change nothing.
        let Some(query) = state.plan.get(cursor) else {
            tracing::warn!(
                cursor,
                plan_len = state.plan.len(),
                "gather invoked past the end of the plan"
            );
            return Ok(StepOutput {
                delta: StateDelta::empty(),
                log_lines: vec!["All plan queries already gathered; nothing to do.".to_string()],
            });
        };

        let log_lines = vec![format!(
            "Searching query {}/{}: {}",
            cursor + 1,
            state.plan.len(),
            query.query
        )];

        let hits = self
            .provider
            .search(&query.query)
            .await
            .map_err(|source| WorkflowError::Provider {
                step: Step::Gather,
                source,
            })?;

        let gathered: Vec<SourceDocument> = hits
            .into_iter()
            .take(self.gather.keep_per_query)
            .map(|hit| SourceDocument {
                source: hit.source,
                content: hit.content,
                origin_query: query.query.clone(),
            })
            .collect();

        Ok(StepOutput {
            delta: StateDelta {
                gathered,
                query_cursor: Some(cursor + 1),
                ..Default::default()
            },
            log_lines,
        })
    }

    /// Synthesize the gathered documents into a draft.
    async fn draft(&self, state: &RunState) -> WorkflowResult<StepOutput> {
        let draft = self
            .producer
            .draft(&state.topic, &state.gathered)
            .await
            .map_err(|source| WorkflowError::Producer {
                step: Step::Draft,
                source,
            })?;

        let log_lines = vec![
            format!("Drafting document from {} gathered sources.", state.gathered.len()),
            "Draft generated.".to_string(),
        ];
        Ok(StepOutput {
            delta: StateDelta {
                draft: Some(draft),
                ..Default::default()
            },
            log_lines,
        })
    }

    /// Score the draft; count the pass and rewind the cursor for a
    /// potential retry.
    async fn critique(&self, state: &RunState) -> WorkflowResult<StepOutput> {
        let report = self
            .producer
            .critique(&state.topic, &state.draft)
            .await
            .map_err(|source| WorkflowError::Producer {
                step: Step::Critique,
                source,
            })?;

        if report.score > 100 {
            return Err(WorkflowError::Producer {
                step: Step::Critique,
                source: ProducerError::MalformedOutput(format!(
                    "critique score {} exceeds the 0-100 scale",
                    report.score
                )),
            });
        }

        let mut log_lines = vec![format!("Critique score: {}/100", report.score)];
        if report.hallucination_risk {
            log_lines.push("Reviewer flagged claims unsupported by the sources.".to_string());
        }

        Ok(StepOutput {
            delta: StateDelta {
                critique_score: Some(report.score),
                critique_feedback: Some(report.feedback),
                retry_count: Some(state.retry_count + 1),
                query_cursor: Some(0),
                ..Default::default()
            },
            log_lines,
        })
    }

    /// Write the accepted draft to the result store.
    async fn persist(&self, state: &RunState) -> WorkflowResult<StepOutput> {
        self.store
            .put(&state.topic, &state.draft)
            .await
            .map_err(|source| WorkflowError::Store {
                step: Step::Persist,
                source,
            })?;

        Ok(StepOutput {
            delta: StateDelta {
                final_result: Some(state.draft.clone()),
                ..Default::default()
            },
            log_lines: vec!["Result stored for topic.".to_string()],
        })
    }
}
