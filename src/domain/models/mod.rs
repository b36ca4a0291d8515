//! Domain models: run state, step identifiers, and configuration.

pub mod config;
pub mod state;
pub mod step;

pub use config::{
    Config, DatabaseConfig, GatherConfig, LoggingConfig, ProgressConfig, QualityPolicy,
};
pub use state::{CritiqueReport, RunState, SearchQuery, SourceDocument, StateDelta};
pub use step::{Step, Transition};
