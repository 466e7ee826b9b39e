//! Error types for gq-load

use gq_core::SourceName;
use gq_db::DbError;
use thiserror::Error;

/// Failure to load one source. Always names the source.
#[derive(Error, Debug)]
pub enum LoadError {
    /// L001: Source file missing or not a regular file
    #[error("[L001] Source '{source_name}' not found at {path}")]
    SourceNotFound { source_name: SourceName, path: String },

    /// L002: The store rejected the file (unreadable, malformed, no header)
    #[error("[L002] Source '{source_name}' could not be loaded: {cause}")]
    Rejected {
        source_name: SourceName,
        #[source]
        cause: DbError,
    },

    /// L004: File is empty or its first line is blank
    #[error("[L004] Source '{source_name}' has no header row: {path}")]
    MissingHeader { source_name: SourceName, path: String },

    /// L003: Table was written but could not be counted afterwards
    #[error("[L003] Source '{source_name}' loaded but row count failed: {cause}")]
    CountFailed {
        source_name: SourceName,
        #[source]
        cause: DbError,
    },
}

impl LoadError {
    /// Name of the source that failed
    pub fn source_name(&self) -> &SourceName {
        match self {
            LoadError::SourceNotFound { source_name, .. }
            | LoadError::MissingHeader { source_name, .. }
            | LoadError::Rejected { source_name, .. }
            | LoadError::CountFailed { source_name, .. } => source_name,
        }
    }
}

/// Result type alias for LoadError
pub type LoadResult<T> = Result<T, LoadError>;
