//! Domain layer: models, capability ports, and error taxonomy.
//!
//! Pure types and contracts with no knowledge of any backing technology.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{RunFailure, WorkflowError, WorkflowResult};
