//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the prediction service; `/predict` is appended.
    pub predict_url: Url,
    pub request_timeout: Duration,
    pub draft_store_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let predict_url_str =
            lookup("PREDICT_URL").unwrap_or_else(|| "http://127.0.0.1:8088".to_string());
        let predict_url = Url::parse(&predict_url_str)
            .map_err(|e| ConfigError::InvalidValue("PREDICT_URL".to_string(), e.to_string()))?;
        if predict_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue(
                "PREDICT_URL".to_string(),
                format!("'{}' cannot be used as a base URL", predict_url_str),
            ));
        }

        let timeout_str = lookup("PREDICT_TIMEOUT_SECS").unwrap_or_else(|| "30".to_string());
        let request_timeout = match timeout_str.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue(
                    "PREDICT_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                ))
            }
        };

        let draft_store_path = lookup("DRAFT_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.sentiment_draft.json"));

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            predict_url,
            request_timeout,
            draft_store_path,
            log_level,
        })
    }
}
