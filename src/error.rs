//! Error types for PolicyRAG
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for PolicyRAG operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, demo authentication, and chat persistence.
#[derive(Error, Debug)]
pub enum PolicyRagError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Demo authentication errors (unknown account, short password)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Chat command errors (no active session, bad slash command)
    #[error("Chat error: {0}")]
    Chat(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Chat storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for PolicyRAG operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
