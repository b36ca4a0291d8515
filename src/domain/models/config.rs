//! Configuration model.
//!
//! Defaults match the pipeline's documented constants: a draft is accepted
//! above a score of 70, at most 4 critique passes run per topic, and the
//! gather step keeps the first 2 documents per query.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, loaded by `infrastructure::config::ConfigLoader`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Acceptance threshold and retry cap for the critique loop.
    #[serde(default)]
    pub quality: QualityPolicy,
    /// Gather-step limits.
    #[serde(default)]
    pub gather: GatherConfig,
    /// Progress stream settings.
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Result-cache database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// When a critiqued draft is accepted and when the retry loop gives up.
///
/// A draft passes only when its score strictly exceeds `score_threshold`.
/// The run stops retrying once `retry_count` exceeds `max_retries`, i.e. at
/// most `max_retries + 1` critique passes happen regardless of score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityPolicy {
    /// Score a draft must exceed to be accepted (0-100).
    #[serde(default = "default_score_threshold")]
    pub score_threshold: u8,
    /// Retry cap; the cap takes precedence over the score.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            score_threshold: default_score_threshold(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_score_threshold() -> u8 {
    70
}

fn default_max_retries() -> u32 {
    3
}

/// Gather-step limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherConfig {
    /// How many search hits to keep per query.
    #[serde(default = "default_keep_per_query")]
    pub keep_per_query: usize,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            keep_per_query: default_keep_per_query(),
        }
    }
}

fn default_keep_per_query() -> usize {
    2
}

/// Progress stream settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Broadcast channel capacity; observers lagging past this drop events.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    1024
}

/// Result-cache database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path.
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_path() -> String {
    ".draftsmith/cache.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Stdout format (json, pretty).
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Optional directory for a daily-rolling JSON log file.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = Config::default();
        assert_eq!(config.quality.score_threshold, 70);
        assert_eq!(config.quality.max_retries, 3);
        assert_eq!(config.gather.keep_per_query, 2);
        assert_eq!(config.progress.channel_capacity, 1024);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"quality": {"score_threshold": 80}}"#).unwrap();
        assert_eq!(config.quality.score_threshold, 80);
        assert_eq!(config.quality.max_retries, 3);
        assert_eq!(config.gather.keep_per_query, 2);
    }
}
