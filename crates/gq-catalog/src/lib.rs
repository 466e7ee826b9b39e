//! gq-catalog - Query catalog for Gallery Query
//!
//! A fixed, process-wide mapping from query name to statement text, plus the
//! execution rules for the three statement kinds:
//!
//! - read queries return their rows unchanged
//! - dedup statements compact a table in one transaction
//! - delete statements remove rows failing a validity predicate
//!
//! The built-in catalog covers the museum / artwork / pricing schema loaded
//! by `gq-load`.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod query;
pub mod statements;

pub use catalog::QueryCatalog;
pub use error::{CatalogError, CatalogResult};
pub use query::{NamedQuery, QueryInfo, ResultShape, StatementKind};
