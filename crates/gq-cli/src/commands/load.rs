//! Load command implementation

use anyhow::{Context, Result};
use gq_core::SourceName;
use gq_load::Loader;

use crate::cli::{GlobalArgs, LoadArgs};
use crate::commands::common::{self, ExitCode, EXIT_DATABASE_ERROR};

/// Sources named by `--sources`, `--all`, or the config, in that priority.
fn select_sources(
    args: &LoadArgs,
    loader: &Loader,
    configured: &[SourceName],
) -> Result<Vec<SourceName>> {
    if args.all {
        return Ok(loader.discover());
    }
    match &args.sources {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| SourceName::parse(s).with_context(|| format!("Invalid source name '{s}'")))
            .collect(),
        None => Ok(configured.to_vec()),
    }
}

/// Execute the load command
pub(crate) async fn execute(args: &LoadArgs, global: &GlobalArgs) -> Result<()> {
    let project = common::load_project(global)?;
    let loader = Loader::from_config(&project.config, &project.root);
    let sources = select_sources(args, &loader, &project.config.sources)?;

    if sources.is_empty() {
        println!("No sources to load.");
        return Ok(());
    }

    let mut session = common::session(&project, global)?;
    let db = session.database().context("Failed to connect to database")?;

    if global.verbose {
        eprintln!(
            "[verbose] Loading {} sources from {}",
            sources.len(),
            loader.data_dir().display()
        );
    }
    println!("Loading {} sources...\n", sources.len());

    let report = loader.load(db, &sources).await;
    for table in &report.loaded {
        println!("  ✓ {} ({} rows)", table.name, table.rows);
    }
    for err in &report.failed {
        println!("  ✗ {} - {}", err.source_name(), err);
    }

    println!();
    println!(
        "Loaded {} sources ({} total rows)",
        report.loaded.len(),
        report.total_rows()
    );

    session.close();
    if !report.is_success() {
        return Err(ExitCode(EXIT_DATABASE_ERROR).into());
    }
    Ok(())
}
