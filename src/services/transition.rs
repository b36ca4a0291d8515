//! Transition policy: the pure decision table of the pipeline state machine.
//!
//! Evaluated exactly once after each step completes, against the post-merge
//! [`RunState`]. Step logic never decides what runs next; this table is the
//! single place every reachable transition lives, which keeps each edge
//! independently testable.

use crate::domain::models::{QualityPolicy, RunState, Step, Transition};

/// Decide the next step after `completed`, given the merged state.
///
/// Rules:
/// 1. Lookup: cache hit is terminal; a miss proceeds to Plan.
/// 2. Plan always proceeds to Gather.
/// 3. Gather loops while the cursor has plan queries left, then Draft.
/// 4. Draft always proceeds to Critique.
/// 5. Critique: Persist when the score strictly exceeds the threshold OR
///    the retry cap is exhausted; otherwise back to Gather. The cap takes
///    precedence regardless of how low the score is, so a run always
///    terminates and persists whatever draft exists.
/// 6. Persist is terminal.
pub fn next_step(completed: Step, state: &RunState, policy: &QualityPolicy) -> Transition {
    match completed {
        Step::Lookup => {
            if state.cache_hit {
                Transition::Complete
            } else {
                Transition::Next(Step::Plan)
            }
        }
        Step::Plan => Transition::Next(Step::Gather),
        Step::Gather => {
            if state.query_cursor < state.plan.len() {
                Transition::Next(Step::Gather)
            } else {
                Transition::Next(Step::Draft)
            }
        }
        Step::Draft => Transition::Next(Step::Critique),
        Step::Critique => {
            let score = state.critique_score.unwrap_or(0);
            if score > policy.score_threshold || state.retry_count > policy.max_retries {
                Transition::Next(Step::Persist)
            } else {
                // Cursor was reset to 0 by the critique step; the retry
                // re-walks the plan and appends fresh documents.
                Transition::Next(Step::Gather)
            }
        }
        Step::Persist => Transition::Complete,
    }
}
