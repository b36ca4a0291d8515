//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Validation failures after a successful extract.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Score threshold outside the 0-100 scale.
    #[error("invalid score_threshold: {0}. Must be at most 100")]
    InvalidScoreThreshold(u8),

    /// Gather step must keep at least one document per query.
    #[error("invalid keep_per_query: {0}. Must be at least 1")]
    InvalidKeepPerQuery(usize),

    /// Broadcast channels reject a zero capacity.
    #[error("invalid channel_capacity: {0}. Must be at least 1")]
    InvalidChannelCapacity(usize),

    /// Empty database path.
    #[error("database path cannot be empty")]
    EmptyDatabasePath,

    /// Pool needs at least one connection.
    #[error("invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    /// Unknown log level.
    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `.draftsmith/config.yaml` (project config)
    /// 3. `.draftsmith/local.yaml` (local overrides, optional)
    /// 4. Environment variables (`DRAFTSMITH_*`, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".draftsmith/config.yaml"))
            .merge(Yaml::file(".draftsmith/local.yaml"))
            .merge(Env::prefixed("DRAFTSMITH_").split("__"))
            .extract()
            .context("failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, on top of defaults.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate a loaded configuration.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.quality.score_threshold > 100 {
            return Err(ConfigError::InvalidScoreThreshold(
                config.quality.score_threshold,
            ));
        }

        if config.gather.keep_per_query == 0 {
            return Err(ConfigError::InvalidKeepPerQuery(config.gather.keep_per_query));
        }

        if config.progress.channel_capacity == 0 {
            return Err(ConfigError::InvalidChannelCapacity(
                config.progress.channel_capacity,
            ));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
