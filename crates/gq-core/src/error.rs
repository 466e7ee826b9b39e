//! Error types for gq-core

use thiserror::Error;

/// Core error type for Gallery Query
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Invalid source or query name
    #[error("[E003] Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: &'static str,
    },

    /// E004: IO error with file path context
    #[error("[E004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E005: YAML parse error
    #[error("[E005] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E006: Result row width differs from the column count
    #[error("[E006] Row {row} has {width} values but the result has {columns} columns")]
    RaggedRow {
        row: usize,
        width: usize,
        columns: usize,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
