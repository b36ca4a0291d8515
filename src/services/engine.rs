//! The workflow orchestrator.
//!
//! Drives the step → merge → progress → transition loop for a single run:
//! every step invocation is followed by exactly one transition evaluation,
//! partial updates are merged into the accumulated state, and a progress
//! record is published after every merge. A capability failure aborts the
//! run immediately and surfaces the accumulated state alongside the error.
//!
//! One engine serves any number of runs; each run owns its [`RunState`] and
//! runs as a single sequential async task. Capability calls are the only
//! suspension points.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::{RunFailure, WorkflowError};
use crate::domain::models::{Config, QualityPolicy, RunState, Step, Transition};
use crate::domain::ports::{Producer, ResultStore, SearchProvider};
use crate::services::progress::{ProgressBus, ProgressEvent, ProgressPayload};
use crate::services::steps::StepRunner;
use crate::services::transition::next_step;

/// The drafting-pipeline state machine driver.
pub struct WorkflowEngine {
    steps: StepRunner,
    policy: QualityPolicy,
    progress: Arc<ProgressBus>,
}

impl WorkflowEngine {
    /// Wire an engine from capability handles and configuration.
    pub fn new(
        producer: Arc<dyn Producer>,
        provider: Arc<dyn SearchProvider>,
        store: Arc<dyn ResultStore>,
        config: &Config,
    ) -> Self {
        Self {
            steps: StepRunner::new(producer, provider, store, config.gather),
            policy: config.quality,
            progress: Arc::new(ProgressBus::new(config.progress.channel_capacity)),
        }
    }

    /// The progress bus this engine publishes to.
    pub fn progress(&self) -> &Arc<ProgressBus> {
        &self.progress
    }

    /// Subscribe to progress events for all runs on this engine.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ProgressEvent> {
        self.progress.subscribe()
    }

    /// Run the pipeline for a topic, returning the full final state.
    ///
    /// On failure the returned [`RunFailure`] carries the state accumulated
    /// up to the abort; progress already streamed is never retracted.
    pub async fn run(&self, topic: &str) -> Result<RunState, RunFailure> {
        let run_id = Uuid::new_v4();

        if topic.trim().is_empty() {
            let error = WorkflowError::InvalidTopic;
            self.progress.publish(
                run_id,
                ProgressPayload::Failed {
                    step: None,
                    message: error.to_string(),
                },
            );
            return Err(RunFailure {
                error,
                state: Box::new(RunState::new(topic)),
            });
        }

        let mut state = RunState::new(topic);
        let mut step = Step::ENTRY;
        tracing::info!(%run_id, topic, "workflow run started");

        loop {
            tracing::debug!(%run_id, step = %step, "executing step");

            let output = match self.steps.execute(step, &state).await {
                Ok(output) => output,
                Err(error) => {
                    tracing::error!(%run_id, step = %step, %error, "workflow run aborted");
                    self.progress.publish(
                        run_id,
                        ProgressPayload::Failed {
                            step: Some(step),
                            message: error.to_string(),
                        },
                    );
                    return Err(RunFailure {
                        error,
                        state: Box::new(state),
                    });
                }
            };

            let new_sources: Vec<String> = output
                .delta
                .gathered
                .iter()
                .map(|doc| doc.source.clone())
                .collect();
            let draft = output.delta.draft.clone();

            state.apply(output.delta);
            state.progress_log.extend(output.log_lines.iter().cloned());
            debug_assert!(state.query_cursor <= state.plan.len());

            self.progress.publish(
                run_id,
                ProgressPayload::StepCompleted {
                    step,
                    log_lines: output.log_lines,
                    new_sources,
                    draft,
                },
            );

            match next_step(step, &state, &self.policy) {
                Transition::Next(next) => step = next,
                Transition::Complete => break,
            }
        }

        let result = state.final_result.clone().unwrap_or_default();
        tracing::info!(
            %run_id,
            cache_hit = state.cache_hit,
            retries = state.retry_count,
            sources = state.gathered.len(),
            "workflow run completed"
        );
        self.progress
            .publish(run_id, ProgressPayload::Completed { result });

        Ok(state)
    }

    /// Run the pipeline and return only the final result text.
    pub async fn run_workflow(&self, topic: &str) -> Result<String, WorkflowError> {
        let state = self.run(topic).await.map_err(|failure| failure.error)?;
        Ok(state.final_result.unwrap_or_default())
    }
}
