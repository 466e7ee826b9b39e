//! Configuration types and parsing for gallery.yml

use crate::error::{CoreError, CoreResult};
use crate::names::{SourceName, DEFAULT_SOURCES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no `--target` flag is given.
pub const TARGET_ENV_VAR: &str = "GQ_TARGET";

/// Main project configuration from gallery.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory holding one `<source>.csv` file per source
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Sources loaded by `gq load`, in order
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceName>,

    /// Store connection parameters
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Named target configurations (e.g. dev, prod) overriding `database`
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Store engine selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// Embedded DuckDB (default)
    #[default]
    DuckDb,
    /// MySQL server
    MySql,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
            DbType::MySql => write!(f, "mysql"),
        }
    }
}

/// Store connection parameters.
///
/// `path` applies to DuckDB; the network fields apply to server engines.
/// None of them are interpreted beyond connection establishment.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// DuckDB file path or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Database (schema) name on the server
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
            host: None,
            port: None,
            user: None,
            password: None,
            name: None,
        }
    }
}

impl DatabaseConfig {
    /// In-memory DuckDB store
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed DuckDB store
    pub fn duckdb_file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

// Hand-written so the password never reaches logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("db_type", &self.db_type)
            .field("path", &self.path)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("name", &self.name)
            .finish()
    }
}

const DEFAULT_DB_PATH: &str = ":memory:";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_data_path() -> String {
    "data".to_string()
}

fn default_sources() -> Vec<SourceName> {
    DEFAULT_SOURCES.iter().map(|s| SourceName::new(*s)).collect()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for gallery.yml or gallery.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("gallery.yml");
        let yaml_path = dir.join("gallery.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.data_path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "data_path cannot be empty".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.as_str()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("Source '{}' is listed more than once", source),
                });
            }
        }

        Ok(())
    }

    /// Data directory resolved against the project root
    pub fn data_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.data_path)
    }

    /// Get database configuration, optionally applying target overrides
    ///
    /// A target without its own `database` block falls back to the base one.
    pub fn get_database_config(&self, target: Option<&str>) -> CoreResult<DatabaseConfig> {
        let Some(name) = target else {
            return Ok(self.database.clone());
        };

        let target_config = self
            .targets
            .get(name)
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: format!(
                    "Target '{}' not found. Available targets: {}",
                    name,
                    self.available_targets().join(", ")
                ),
            })?;

        Ok(target_config
            .database
            .clone()
            .unwrap_or_else(|| self.database.clone()))
    }

    /// Sorted list of target names
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve target from CLI flag or GQ_TARGET environment variable
    ///
    /// Priority: CLI flag > GQ_TARGET env var > None
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var(TARGET_ENV_VAR).ok().filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
