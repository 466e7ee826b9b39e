//! Error types for gq-catalog

use gq_core::QueryName;
use gq_db::DbError;
use thiserror::Error;

/// Catalog lookup and execution errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Q001: No query with this name
    #[error("[Q001] Unknown query '{name}'")]
    UnknownQuery { name: String },

    /// Q002: The store rejected the named statement
    #[error("[Q002] Query '{name}' failed: {cause}")]
    Query {
        name: QueryName,
        #[source]
        cause: DbError,
    },

    /// Q003: Two catalog entries share a name
    #[error("[Q003] Duplicate query name '{name}' in catalog")]
    DuplicateQuery { name: QueryName },

    /// Q004: A dedup target's columns differ from its partition columns
    #[error(
        "[Q004] Query '{name}' partitions {table} by [{}] but the table has columns [{}]",
        .expected.join(", "),
        .actual.join(", ")
    )]
    PartitionMismatch {
        name: QueryName,
        table: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// Result type alias for CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
