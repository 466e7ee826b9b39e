//! The query catalog: lookup, discovery and execution.

use crate::builtin::builtin_queries;
use crate::error::{CatalogError, CatalogResult};
use crate::query::{NamedQuery, QueryInfo};
use gq_core::{QueryName, ResultSet};
use gq_db::Database;
use std::collections::HashMap;
use std::sync::OnceLock;

static BUILTIN: OnceLock<QueryCatalog> = OnceLock::new();

/// Immutable mapping from query name to statement.
///
/// Entries keep their definition order for listing. The catalog never holds
/// a connection; every execution borrows one from the caller.
#[derive(Debug)]
pub struct QueryCatalog {
    queries: Vec<NamedQuery>,
    index: HashMap<QueryName, usize>,
}

impl QueryCatalog {
    /// Build a catalog, rejecting duplicate names.
    pub fn new(queries: Vec<NamedQuery>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(queries.len());
        for (pos, query) in queries.iter().enumerate() {
            if index.insert(query.name.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateQuery {
                    name: query.name.clone(),
                });
            }
        }
        Ok(Self { queries, index })
    }

    /// The painting catalog, built on first access and shared for the
    /// lifetime of the process.
    pub fn builtin() -> &'static QueryCatalog {
        BUILTIN.get_or_init(|| {
            QueryCatalog::new(builtin_queries()).expect("built-in query names are unique")
        })
    }

    pub fn get(&self, name: &str) -> Option<&NamedQuery> {
        self.index.get(name).map(|&pos| &self.queries[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedQuery> {
        self.queries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.queries.iter().map(|q| q.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// `(name, description, kind, columns)` for every entry, in order
    pub fn describe(&self) -> Vec<QueryInfo> {
        self.queries.iter().map(NamedQuery::info).collect()
    }

    /// Execute the named statement against `db`.
    pub async fn execute(&self, db: &dyn Database, name: &str) -> CatalogResult<ResultSet> {
        let query = self.get(name).ok_or_else(|| CatalogError::UnknownQuery {
            name: name.to_string(),
        })?;

        log::debug!("Executing {} query '{}'", query.kind.label(), query.name);
        query.run(db).await
    }

    /// Execute every read-only entry in order, continuing past failures.
    pub async fn execute_all_reads(
        &self,
        db: &dyn Database,
    ) -> Vec<(&NamedQuery, CatalogResult<ResultSet>)> {
        let mut results = Vec::new();
        for query in self.queries.iter().filter(|q| q.kind.is_read()) {
            let result = self.execute(db, &query.name).await;
            if let Err(e) = &result {
                log::warn!("{}", e);
            }
            results.push((query, result));
        }
        results
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
