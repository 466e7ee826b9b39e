//! gq-load - CSV loader for Gallery Query
//!
//! Loads named CSV sources into the store, one replacement table per source.

pub mod error;
pub mod loader;

pub use error::{LoadError, LoadResult};
pub use loader::{LoadReport, LoadedTable, Loader};
