//! Configuration management utilities

use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL_NAME: &str = "ollama_chat/ministral-3:8b";

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {key}: {detail}")]
    InvalidValue { key: String, detail: String },
}

/// LLM model settings shared by every agent profile
///
/// This is passed by value to the code that builds agents; there is no
/// process-wide model setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider-qualified model identifier (e.g. `ollama_chat/llama3.1:latest`)
    pub name: String,
    /// Sampling temperature, provider default when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ModelConfig {
    /// Create a model config for the given model name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature: None,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_NAME)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Model used by the root agent and its sub-agents
    pub model: ModelConfig,
    /// Directory holding `<identifier>.csv` price/NAV histories
    pub data_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "fin-advisor".to_string(),
            environment: "development".to_string(),
            model: ModelConfig::default(),
            data_dir: PathBuf::from("data"),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment
    ///
    /// Reads `ADVISOR_ENV`, `ADVISOR_MODEL`, `ADVISOR_DATA_DIR` and
    /// `ADVISOR_LOG_FORMAT`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(env) = lookup("ADVISOR_ENV") {
            config.environment = env;
        }
        if let Some(model) = lookup("ADVISOR_MODEL") {
            config.model.name = model;
        }
        if let Some(dir) = lookup("ADVISOR_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup("ADVISOR_LOG_FORMAT") {
            config.log_format = format.parse().map_err(|detail| ConfigError::InvalidValue {
                key: "ADVISOR_LOG_FORMAT".to_string(),
                detail,
            })?;
        }

        Ok(config)
    }
}
