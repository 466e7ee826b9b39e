//! gq-core - Core library for Gallery Query
//!
//! Shared types used by every other crate in the workspace: project
//! configuration, strongly-typed source and query names, CSV source
//! discovery, and the scalar value / result set model returned by the store.

pub mod config;
pub mod error;
mod newtype_name;
pub mod names;
pub mod source;
pub mod sql_utils;
pub mod value;

pub use config::{Config, DatabaseConfig, DbType};
pub use error::{CoreError, CoreResult};
pub use names::{QueryName, SourceName};
pub use source::{discover_sources, Source};
pub use value::{ResultSet, Value};
