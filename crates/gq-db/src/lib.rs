//! gq-db - Database abstraction layer for Gallery Query
//!
//! This crate provides the `Database` trait, the DuckDB implementation, and
//! [`Session`], which owns the store connection for the lifetime of a
//! loading or query session.

pub mod duckdb;
pub mod error;
pub(crate) mod row_helpers;
pub mod session;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use session::{connect, Session, SessionState};
pub use traits::Database;
