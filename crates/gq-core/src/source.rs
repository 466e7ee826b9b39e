//! CSV source files
//!
//! A source is a comma-separated file with a header row. Its file stem is
//! the source name and, once loaded, the name of the table it replaces.

use crate::error::{CoreError, CoreResult};
use crate::names::SourceName;
use std::path::{Path, PathBuf};

/// A named CSV input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: SourceName,
    pub path: PathBuf,
}

impl Source {
    /// Source `<data_dir>/<name>.csv`. The file is not required to exist.
    pub fn in_dir(data_dir: &Path, name: &SourceName) -> Self {
        Self {
            name: name.clone(),
            path: data_dir.join(format!("{}.csv", name)),
        }
    }

    /// Create a source from a CSV file path, naming it after the file stem.
    pub fn from_file(path: PathBuf) -> CoreResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CoreError::InvalidName {
                kind: "source",
                name: path.display().to_string(),
                reason: "file name is not valid UTF-8",
            })?;
        let name = SourceName::parse(stem)?;
        Ok(Self { name, path })
    }

    /// Path as a string for embedding in engine statements
    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

/// Discover every `*.csv` directly inside `data_dir`, sorted by name.
///
/// Files whose stem is not a valid source name are skipped with a warning.
/// A missing directory yields an empty list.
pub fn discover_sources(data_dir: &Path) -> Vec<Source> {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot read data directory {}: {}", data_dir.display(), e);
            return Vec::new();
        }
    };

    let mut sources: Vec<Source> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "csv"))
        .filter_map(|path| match Source::from_file(path) {
            Ok(source) => Some(source),
            Err(e) => {
                log::warn!("Skipping CSV file: {}", e);
                None
            }
        })
        .collect();

    sources.sort_by(|a, b| a.name.cmp(&b.name));
    sources
}
