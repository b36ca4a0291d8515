//! Service layer: the orchestrator, its step registry, the transition
//! policy, and the progress bus.

pub mod engine;
pub mod progress;
pub mod steps;
pub mod transition;

pub use engine::WorkflowEngine;
pub use progress::{ProgressBus, ProgressEvent, ProgressPayload, SequenceNumber};
pub use steps::{StepOutput, StepRunner};
pub use transition::next_step;
