//! Progress bus: the ordered, append-only stream of run events.
//!
//! Broadcast-based with sequence numbering. Publication is fire-and-forget:
//! the engine never blocks on a slow or absent observer, and events for a
//! single run are published in step-completion order. Observers demultiplex
//! concurrent runs by `run_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::models::Step;

/// Monotonically increasing sequence number assigned at publish time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceNumber(pub u64);

impl std::fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of the observer-facing stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Bus-wide publication order.
    pub sequence: SequenceNumber,
    /// The run this event belongs to.
    pub run_id: Uuid,
    /// Publication time.
    pub timestamp: DateTime<Utc>,
    /// The record payload.
    pub payload: ProgressPayload,
}

impl ProgressEvent {
    /// The wire-level JSON shape a transport adapter sends verbatim.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Progress record payload.
///
/// The serialized shape is the wire-level contract a transport adapter must
/// preserve verbatim; the core only guarantees production order, not
/// delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ProgressPayload {
    /// A step finished and its update was merged.
    StepCompleted {
        /// The completed step.
        step: Step,
        /// Log lines the step emitted.
        log_lines: Vec<String>,
        /// Sources of documents added by this step (gather only, usually).
        new_sources: Vec<String>,
        /// The draft, present only when this step changed it.
        draft: Option<String>,
    },
    /// Terminal success.
    Completed {
        /// The final result text.
        result: String,
    },
    /// Terminal failure; `step` is absent only when the topic was rejected
    /// before the first step ran.
    Failed {
        /// The step that was executing, if any.
        step: Option<Step>,
        /// Human-readable cause.
        message: String,
    },
}

/// Broadcast bus for progress events.
pub struct ProgressBus {
    sender: broadcast::Sender<ProgressEvent>,
    sequence: AtomicU64,
}

impl ProgressBus {
    /// Create a bus with the given channel capacity.
    pub fn new(channel_capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(channel_capacity);
        Self {
            sender,
            sequence: AtomicU64::new(0),
        }
    }

    /// Publish an event, assigning the next sequence number.
    ///
    /// Send errors are ignored: an absent observer must not affect the run.
    pub fn publish(&self, run_id: Uuid, payload: ProgressPayload) {
        let sequence = SequenceNumber(self.sequence.fetch_add(1, Ordering::SeqCst));
        let _ = self.sender.send(ProgressEvent {
            sequence,
            run_id,
            timestamp: Utc::now(),
            payload,
        });
    }

    /// Subscribe to the stream. Only events published after the call are
    /// received.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }

    /// Number of events published so far.
    pub fn current_sequence(&self) -> SequenceNumber {
        SequenceNumber(self.sequence.load(Ordering::SeqCst))
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ProgressBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
