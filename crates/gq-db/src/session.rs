//! Scoped store connections.
//!
//! A [`Session`] starts `Unopened`, acquires its connection on first use and
//! releases it on [`Session::close`] or drop. The loader and the query
//! catalog borrow the connection from the session; nothing holds it
//! globally.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use gq_core::{DatabaseConfig, DbType};

/// Connection lifecycle of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, no connection held
    Unopened,
    /// Connection acquired; statements may run
    Open,
}

/// Owner of a single store connection.
pub struct Session {
    config: DatabaseConfig,
    db: Option<Box<dyn Database>>,
}

impl Session {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config, db: None }
    }

    pub fn state(&self) -> SessionState {
        if self.db.is_some() {
            SessionState::Open
        } else {
            SessionState::Unopened
        }
    }

    /// Borrow the store, connecting first if the session is unopened.
    pub fn database(&mut self) -> DbResult<&dyn Database> {
        if self.db.is_none() {
            let db = connect(&self.config)?;
            log::debug!("Opened {} session", db.db_type());
            self.db = Some(db);
        }
        self.db
            .as_deref()
            .ok_or_else(|| DbError::ConnectionError("session has no connection".to_string()))
    }

    /// Release the connection. A no-op when already unopened.
    pub fn close(&mut self) {
        if let Some(db) = self.db.take() {
            log::debug!("Closing {} session", db.db_type());
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Open a store connection from its configuration.
pub fn connect(config: &DatabaseConfig) -> DbResult<Box<dyn Database>> {
    match config.db_type {
        DbType::DuckDb => Ok(Box::new(DuckDbBackend::new(&config.path)?)),
        DbType::MySql => {
            let missing: Vec<&str> = [
                ("host", config.host.is_none()),
                ("user", config.user.is_none()),
                ("name", config.name.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            if !missing.is_empty() {
                return Err(DbError::ConnectionError(format!(
                    "mysql connection requires {}",
                    missing.join(", ")
                )));
            }
            Err(DbError::NotImplemented {
                backend: "mysql".to_string(),
                feature: "connections".to_string(),
            })
        }
    }
}
