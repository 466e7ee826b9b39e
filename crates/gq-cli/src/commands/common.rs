//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use gq_core::{Config, DatabaseConfig, DbType, ResultSet};
use gq_db::Session;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that the session is dropped and its connection released first.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; the command already reported the failure.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for store and load failures
pub(crate) const EXIT_DATABASE_ERROR: i32 = 4;

/// A loaded `gallery.yml` and the directory it is resolved against
pub(crate) struct Project {
    pub root: PathBuf,
    pub config: Config,
}

/// Load the project config from `--config` or the project directory.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load project config")?;

    Ok(Project { root, config })
}

/// Database settings for the selected target.
///
/// A relative DuckDB file path is resolved against the project root so the
/// same store is used whatever the working directory.
pub(crate) fn database_config(project: &Project, global: &GlobalArgs) -> Result<DatabaseConfig> {
    let target = Config::resolve_target(global.target.as_deref());
    let mut db_config = project
        .config
        .get_database_config(target.as_deref())
        .context("Failed to resolve database target")?;

    if db_config.db_type == DbType::DuckDb && db_config.path != ":memory:" {
        let path = Path::new(&db_config.path);
        if path.is_relative() {
            db_config.path = project.root.join(path).display().to_string();
        }
    }

    if let Some(name) = &target {
        log::debug!("Using target '{}' ({})", name, db_config.db_type);
    }
    Ok(db_config)
}

/// Unopened session for the selected target
pub(crate) fn session(project: &Project, global: &GlobalArgs) -> Result<Session> {
    Ok(Session::new(database_config(project, global)?))
}

/// Calculate column widths for a table given headers and rows.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a left-aligned table: header, dashes, rows, two-space separated.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

/// Print a result set as a table followed by its row count.
pub(crate) fn print_result_set(rs: &ResultSet) {
    if rs.is_empty() {
        println!("(0 rows)");
        return;
    }
    let headers: Vec<&str> = rs.columns.iter().map(String::as_str).collect();
    print_table(&headers, &rs.to_string_rows());
    println!("\n({} rows)", rs.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use gq_core::config::TargetConfig;

    #[test]
    fn test_column_widths_cover_header_and_cells() {
        let rows = vec![
            vec!["1".to_string(), "Musee d'Orsay".to_string()],
            vec!["20".to_string(), "Prado".to_string()],
        ];
        assert_eq!(calculate_column_widths(&["museum_id", "name"], &rows), vec![9, 13]);
    }

    #[test]
    fn test_column_widths_count_characters() {
        let rows = vec![vec!["Musée".to_string()]];
        assert_eq!(calculate_column_widths(&["name"], &rows), vec![5]);
    }

    #[test]
    fn test_relative_duckdb_path_resolves_against_root() {
        let project = Project {
            root: PathBuf::from("/srv/gallery"),
            config: Config {
                name: "gallery".to_string(),
                data_path: "data".to_string(),
                sources: Vec::new(),
                database: DatabaseConfig::duckdb_file("store/gallery.duckdb"),
                targets: [("local".to_string(), TargetConfig::default())].into(),
            },
        };
        let global = GlobalArgs {
            verbose: false,
            project_dir: "/srv/gallery".to_string(),
            config: None,
            target: Some("local".to_string()),
        };

        let db = database_config(&project, &global).unwrap();
        assert_eq!(
            PathBuf::from(db.path),
            PathBuf::from("/srv/gallery/store/gallery.duckdb")
        );
    }
}
