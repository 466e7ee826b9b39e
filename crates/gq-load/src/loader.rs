//! Drop-and-recreate loading of CSV sources.

use crate::error::{LoadError, LoadResult};
use gq_core::sql_utils::quote_ident;
use gq_core::{discover_sources, Config, Source, SourceName};
use gq_db::Database;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A successfully loaded source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub name: SourceName,
    pub rows: usize,
}

/// Per-source outcome of [`Loader::load`], in request order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadedTable>,
    pub failed: Vec<LoadError>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.loaded.iter().map(|t| t.rows).sum()
    }
}

/// Loads CSV files from one data directory into same-named tables.
#[derive(Debug, Clone)]
pub struct Loader {
    data_dir: PathBuf,
}

impl Loader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loader over the project's `data_path`
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(config.data_path_absolute(root))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve the CSV file backing `name`
    pub fn source(&self, name: &SourceName) -> Source {
        Source::in_dir(&self.data_dir, name)
    }

    /// Every CSV source present in the data directory, sorted by name
    pub fn discover(&self) -> Vec<SourceName> {
        discover_sources(&self.data_dir)
            .into_iter()
            .map(|source| source.name)
            .collect()
    }

    /// Replace table `name` with the contents of `<data_dir>/<name>.csv`.
    ///
    /// Any existing table of that name is dropped, whoever wrote it.
    pub async fn load_source(
        &self,
        db: &dyn Database,
        name: &SourceName,
    ) -> LoadResult<LoadedTable> {
        let source = self.source(name);
        if !source.path.is_file() {
            return Err(LoadError::SourceNotFound {
                source_name: name.clone(),
                path: source.path_str(),
            });
        }

        let has_header = first_line_has_content(&source.path).map_err(|e| {
            log::debug!("Cannot read {}: {}", source.path.display(), e);
            LoadError::SourceNotFound {
                source_name: name.clone(),
                path: source.path_str(),
            }
        })?;
        if !has_header {
            return Err(LoadError::MissingHeader {
                source_name: name.clone(),
                path: source.path_str(),
            });
        }

        log::debug!("Loading {} from {}", name, source.path.display());
        db.load_csv(name, &source.path_str())
            .await
            .map_err(|cause| LoadError::Rejected {
                source_name: name.clone(),
                cause,
            })?;

        let rows = db
            .query_count(&format!("SELECT * FROM {}", quote_ident(name)))
            .await
            .map_err(|cause| LoadError::CountFailed {
                source_name: name.clone(),
                cause,
            })?;

        log::info!("Loaded {} ({} rows)", name, rows);
        Ok(LoadedTable {
            name: name.clone(),
            rows,
        })
    }

    /// Load each source in order.
    ///
    /// A failing source is recorded and skipped; earlier loads stay in place.
    pub async fn load(&self, db: &dyn Database, sources: &[SourceName]) -> LoadReport {
        let mut report = LoadReport::default();
        for name in sources {
            match self.load_source(db, name).await {
                Ok(table) => report.loaded.push(table),
                Err(e) => {
                    log::warn!("{}", e);
                    report.failed.push(e);
                }
            }
        }
        report
    }
}

/// Whether the first line of `path` holds anything besides whitespace.
///
/// The engine reads a blank first line as an empty header and loads a
/// column-less table, so such files are caught here.
fn first_line_has_content(path: &Path) -> std::io::Result<bool> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    Ok(!line.iter().all(u8::is_ascii_whitespace))
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
