//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the JSON store, one file per key.
    pub storage_dir: PathBuf,
    pub log_level: Level,
    /// Base URL of the remote backend. Absent means no external actor is
    /// configured and every page runs purely against local persistence.
    pub backend_url: Option<String>,
    /// Synthetic delay before the refinement template completes.
    pub refine_delay: Duration,
    /// Synthetic delay before the idea templates complete.
    pub idea_delay: Duration,
    /// Synthetic delay standing in for a remote mirror when no backend exists.
    pub mirror_delay: Duration,
    /// How often the collaboration watcher re-reads the store.
    pub poll_interval: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let storage_dir = std::env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let backend_url = std::env::var("BACKEND_URL").ok();

        let refine_delay = millis_var("REFINE_DELAY_MS", 1500)?;
        let idea_delay = millis_var("IDEA_DELAY_MS", 2000)?;
        let mirror_delay = millis_var("MIRROR_DELAY_MS", 600)?;
        let poll_interval = millis_var("POLL_INTERVAL_MS", 2000)?;

        Ok(Self {
            storage_dir,
            log_level,
            backend_url,
            refine_delay,
            idea_delay,
            mirror_delay,
            poll_interval,
        })
    }
}

fn millis_var(name: &str, default: u64) -> Result<Duration, ConfigError> {
    let millis = match std::env::var(name) {
        Ok(raw) => raw.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                name.to_string(),
                format!("'{}' is not a valid millisecond count", raw),
            )
        })?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(millis))
}
