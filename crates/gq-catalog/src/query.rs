//! Catalog entries.

use crate::error::{CatalogError, CatalogResult};
use crate::statements::{dedup_statement, delete_statement, duplicate_count_statement};
use gq_core::sql_utils::quote_ident;
use gq_core::{QueryName, ResultSet, Value};
use gq_db::{Database, DbError, DbResult};
use serde::Serialize;

/// Columns of the one-row result returned by mutating statements.
pub const MUTATION_COLUMNS: &[&str] = &["table", "rows_removed"];

/// How a statement touches the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// Pure read; re-running against an unchanged store gives the same rows
    Read,
    /// Keeps one row per group of equal `columns` values in `table`
    Dedup { table: String, columns: Vec<String> },
    /// Removes rows of `table` that fail a validity predicate
    Delete { table: String },
}

impl StatementKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatementKind::Read => "read",
            StatementKind::Dedup { .. } => "dedup",
            StatementKind::Delete { .. } => "delete",
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, StatementKind::Read)
    }
}

/// Declared shape of a statement's result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    Columns(Vec<String>),
    /// One `(table, rows_removed)` row
    RowsRemoved,
}

impl ResultShape {
    pub fn columns(&self) -> Vec<String> {
        match self {
            ResultShape::Columns(columns) => columns.clone(),
            ResultShape::RowsRemoved => MUTATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// A named, parameterless statement
#[derive(Debug, Clone)]
pub struct NamedQuery {
    pub name: QueryName,
    pub description: String,
    pub sql: String,
    pub kind: StatementKind,
    pub shape: ResultShape,
}

/// Discovery record for listing the catalog
#[derive(Debug, Clone, Serialize)]
pub struct QueryInfo {
    pub name: String,
    pub description: String,
    pub kind: &'static str,
    pub columns: Vec<String>,
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

impl NamedQuery {
    pub fn read(name: &str, description: &str, sql: &str, columns: &[&str]) -> Self {
        Self {
            name: QueryName::new(name),
            description: description.to_string(),
            sql: sql.to_string(),
            kind: StatementKind::Read,
            shape: ResultShape::Columns(owned(columns)),
        }
    }

    /// Read query counting fully duplicated rows of `table`
    pub fn duplicate_count(name: &str, description: &str, table: &str) -> Self {
        Self {
            name: QueryName::new(name),
            description: description.to_string(),
            sql: duplicate_count_statement(table),
            kind: StatementKind::Read,
            shape: ResultShape::Columns(owned(&["duplicate_rows"])),
        }
    }

    pub fn dedup(name: &str, description: &str, table: &str, columns: &[&str]) -> Self {
        Self {
            name: QueryName::new(name),
            description: description.to_string(),
            sql: dedup_statement(table, columns),
            kind: StatementKind::Dedup {
                table: table.to_string(),
                columns: owned(columns),
            },
            shape: ResultShape::RowsRemoved,
        }
    }

    pub fn delete(name: &str, description: &str, table: &str, predicate: &str) -> Self {
        Self {
            name: QueryName::new(name),
            description: description.to_string(),
            sql: delete_statement(table, predicate),
            kind: StatementKind::Delete {
                table: table.to_string(),
            },
            shape: ResultShape::RowsRemoved,
        }
    }

    pub fn info(&self) -> QueryInfo {
        QueryInfo {
            name: self.name.to_string(),
            description: self.description.clone(),
            kind: self.kind.label(),
            columns: self.shape.columns(),
        }
    }

    /// Run the statement according to its kind.
    pub(crate) async fn run(&self, db: &dyn Database) -> CatalogResult<ResultSet> {
        match &self.kind {
            StatementKind::Read => db.query(&self.sql).await.map_err(|e| self.failed(e)),
            StatementKind::Dedup { table, columns } => {
                self.check_partition(db, table, columns).await?;
                self.run_dedup(db, table).await.map_err(|e| self.failed(e))
            }
            StatementKind::Delete { table } => {
                let removed = db.execute(&self.sql).await.map_err(|e| self.failed(e))?;
                Ok(rows_removed(table, removed))
            }
        }
    }

    fn failed(&self, cause: DbError) -> CatalogError {
        CatalogError::Query {
            name: self.name.clone(),
            cause,
        }
    }

    /// A dedup must partition by every column of its table, or rows that
    /// differ only in an unlisted column would be collapsed.
    ///
    /// A missing table passes here and fails on the row count instead.
    async fn check_partition(
        &self,
        db: &dyn Database,
        table: &str,
        columns: &[String],
    ) -> CatalogResult<()> {
        let actual = db.table_columns(table).await.map_err(|e| self.failed(e))?;
        if actual.is_empty() {
            return Ok(());
        }

        let mut expected_sorted = columns.to_vec();
        let mut actual_sorted = actual.clone();
        expected_sorted.sort();
        actual_sorted.sort();
        if expected_sorted != actual_sorted {
            return Err(CatalogError::PartitionMismatch {
                name: self.name.clone(),
                table: table.to_string(),
                expected: columns.to_vec(),
                actual,
            });
        }
        Ok(())
    }

    async fn run_dedup(&self, db: &dyn Database, table: &str) -> DbResult<ResultSet> {
        let count_sql = format!("SELECT * FROM {}", quote_ident(table));
        let before = db.query_count(&count_sql).await?;
        db.execute_in_transaction(&self.sql).await?;
        let after = db.query_count(&count_sql).await?;
        Ok(rows_removed(table, before.saturating_sub(after)))
    }
}

fn rows_removed(table: &str, removed: usize) -> ResultSet {
    ResultSet {
        columns: MUTATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: vec![vec![
            Value::from(table),
            Value::Integer(i64::try_from(removed).unwrap_or(i64::MAX)),
        ]],
    }
}
