//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use gq_core::ResultSet;

/// Store abstraction shared by the loader and the query catalog.
///
/// Implementations must be Send + Sync for async operation. Callers never
/// issue statements concurrently; implementations still serialise access to
/// their connection.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one statement, returning the number of affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute several `;`-separated statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute several statements inside one transaction, rolling back on error
    async fn execute_in_transaction(&self, sql: &str) -> DbResult<()>;

    /// Run a query and collect every row
    async fn query(&self, sql: &str) -> DbResult<ResultSet>;

    /// Count the rows a query returns
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Check if a table or view exists in the default schema
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Column names of a table in the default schema, in declaration order.
    ///
    /// Empty when the table does not exist.
    async fn table_columns(&self, table: &str) -> DbResult<Vec<String>>;

    /// Replace `table` with the contents of the CSV file at `path`.
    ///
    /// The header row defines the columns; row order follows the file.
    async fn load_csv(&self, table: &str, path: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
