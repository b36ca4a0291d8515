//! Property tests for the transition policy bounds.
//!
//! The policy is pure, so the full state machine can be simulated without
//! capabilities: each step's documented state effect is applied by hand and
//! the policy alone decides the path. The properties checked:
//!
//! - persist is never reached with more than 4 critique passes
//! - gather is never entered with the cursor at or past the plan end
//! - gathered length never decreases
//! - every run terminates well inside a fixed step limit

use proptest::prelude::*;

use draftsmith::services::next_step;
use draftsmith::{QualityPolicy, RunState, SearchQuery, SourceDocument, Step, Transition};

fn document(i: usize) -> SourceDocument {
    SourceDocument {
        source: format!("source-{i}"),
        content: "content".to_string(),
        origin_query: "query".to_string(),
    }
}

proptest! {
    #[test]
    fn policy_bounds_hold_for_any_score_sequence(
        plan_len in 1usize..=5,
        cache_hit in any::<bool>(),
        scores in prop::collection::vec(0u8..=100, 1..=8),
    ) {
        let policy = QualityPolicy::default();
        let mut state = RunState::new("topic");
        let mut step = Step::ENTRY;
        let mut scores = scores.iter().cycle();
        let mut steps_run = 0usize;
        let mut prev_gathered = 0usize;

        loop {
            steps_run += 1;
            // 1 lookup + 1 plan + 4 passes x (5 gathers + draft + critique)
            // + persist = 31; anything near the limit is a policy bug.
            prop_assert!(steps_run <= 40, "run did not terminate");

            match step {
                Step::Lookup => {
                    state.cache_hit = cache_hit;
                    if cache_hit {
                        state.final_result = Some("cached".to_string());
                    }
                }
                Step::Plan => {
                    state.plan = (0..plan_len)
                        .map(|i| SearchQuery::new(format!("q{i}"), "r"))
                        .collect();
                    state.query_cursor = 0;
                }
                Step::Gather => {
                    prop_assert!(
                        state.query_cursor < state.plan.len(),
                        "gather entered with cursor {} past plan of {}",
                        state.query_cursor,
                        state.plan.len()
                    );
                    state.gathered.push(document(state.gathered.len()));
                    state.query_cursor += 1;
                }
                Step::Draft => {
                    state.draft = "draft".to_string();
                }
                Step::Critique => {
                    state.critique_score = Some(*scores.next().unwrap());
                    state.retry_count += 1;
                    state.query_cursor = 0;
                }
                Step::Persist => {
                    prop_assert!(
                        state.retry_count <= 4,
                        "persist reached after {} critique passes",
                        state.retry_count
                    );
                    state.final_result = Some(state.draft.clone());
                }
            }

            prop_assert!(state.gathered.len() >= prev_gathered);
            prev_gathered = state.gathered.len();
            prop_assert!(state.query_cursor <= state.plan.len());

            match next_step(step, &state, &policy) {
                Transition::Next(next) => step = next,
                Transition::Complete => break,
            }
        }

        prop_assert!(state.final_result.is_some());
        if cache_hit {
            // The short circuit never plans or gathers.
            prop_assert_eq!(steps_run, 1);
            prop_assert_eq!(state.gathered.len(), 0);
        }
    }

    #[test]
    fn gather_phase_length_matches_plan(
        plan_len in 1usize..=5,
    ) {
        // A single passing run gathers exactly plan_len times.
        let policy = QualityPolicy::default();
        let mut state = RunState::new("topic");
        state.plan = (0..plan_len)
            .map(|i| SearchQuery::new(format!("q{i}"), "r"))
            .collect();
        state.query_cursor = 0;

        let mut gathers = 0usize;
        let mut step = Step::Gather;
        loop {
            prop_assert_eq!(step, Step::Gather);
            gathers += 1;
            state.query_cursor += 1;
            match next_step(step, &state, &policy) {
                Transition::Next(Step::Gather) => step = Step::Gather,
                Transition::Next(Step::Draft) => break,
                other => prop_assert!(false, "unexpected transition {:?}", other),
            }
        }
        prop_assert_eq!(gathers, plan_len);
    }
}
