//! Configuration management for PolicyRAG
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file, environment variables, and CLI
//! overrides.

use crate::error::{PolicyRagError, Result};
use crate::storage::SledStorage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for PolicyRAG
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Demo assistant behavior
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Chat storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the embedded database; defaults to the user's
    /// application data directory when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Demo assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Simulated response delay in milliseconds
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,

    /// Print a "searching" indicator while the simulated delay runs
    #[serde(default = "default_show_searching")]
    pub show_searching: bool,
}

fn default_response_delay_ms() -> u64 {
    crate::assistant::DEFAULT_RESPONSE_DELAY_MS
}

fn default_show_searching() -> bool {
    true
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            show_searching: default_show_searching(),
        }
    }
}

impl Config {
    /// Load configuration from a file with env-var and CLI overrides
    ///
    /// Falls back to defaults when the file does not exist. Environment
    /// variables take precedence over the file; CLI flags take precedence
    /// over both.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Parse configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(data_dir) = std::env::var("POLICYRAG_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(data_dir));
        }

        if let Ok(delay) = std::env::var("POLICYRAG_RESPONSE_DELAY_MS") {
            if let Ok(parsed) = delay.parse() {
                self.assistant.response_delay_ms = parsed;
            } else {
                tracing::warn!("Invalid POLICYRAG_RESPONSE_DELAY_MS: {}", delay);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(data_dir) = &cli.data_dir {
            self.storage.data_dir = Some(data_dir.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `PolicyRagError::Config` when a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.assistant.response_delay_ms > 60_000 {
            return Err(PolicyRagError::Config(format!(
                "assistant.response_delay_ms must be at most 60000, got {}",
                self.assistant.response_delay_ms
            ))
            .into());
        }

        Ok(())
    }

    /// Open the configured storage backend
    pub fn open_storage(&self) -> Result<SledStorage> {
        match &self.storage.data_dir {
            Some(dir) => SledStorage::new_with_path(dir.join("chat.db")),
            None => SledStorage::new(),
        }
    }
}
