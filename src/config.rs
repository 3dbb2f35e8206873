//! Configuration module for the marker pipeline
//!
//! Loaded from JSON bytes handed over by the embedding application.
//! Every field has a default, so `{}` is a valid configuration.

use serde::Deserialize;

use crate::streaming::SHARED_MEM_SIZE;

/// Pipeline configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Shared memory window size in bytes (fixed after creation)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Name given to the worker thread
    #[serde(default = "default_worker_name")]
    pub worker_name: String,

    /// Whether to emit a telemetry event per drain cycle
    #[serde(default = "default_log_cycles")]
    pub log_cycles: bool,
}

fn default_capacity() -> usize {
    SHARED_MEM_SIZE
}

pub(crate) fn default_worker_name() -> String {
    "marker-worker".to_string()
}

fn default_log_cycles() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            worker_name: default_worker_name(),
            log_cycles: default_log_cycles(),
        }
    }
}

impl PipelineConfig {
    /// Parse configuration from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config_str =
            std::str::from_utf8(bytes).map_err(|e| ConfigError::InvalidUtf8(e.to_string()))?;

        let config: Self = serde_json::from_str(config_str)
            .map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

/// Configuration parsing errors
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidUtf8(String),
    InvalidJson(String),
    InvalidCapacity(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {}", e),
            ConfigError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
            ConfigError::InvalidCapacity(c) => write!(f, "Invalid capacity: {}", c),
        }
    }
}

impl std::error::Error for ConfigError {}
