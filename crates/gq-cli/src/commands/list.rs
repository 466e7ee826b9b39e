//! List command implementation

use anyhow::{Context, Result};
use gq_catalog::QueryCatalog;

use crate::cli::ListArgs;
use crate::commands::common;

/// Execute the list command
pub(crate) async fn execute(args: &ListArgs) -> Result<()> {
    let infos = QueryCatalog::builtin().describe();

    if args.json {
        let json = serde_json::to_string_pretty(&infos).context("Failed to serialize catalog")?;
        println!("{}", json);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = infos
        .iter()
        .map(|info| {
            vec![
                info.name.clone(),
                info.kind.to_string(),
                info.columns.join(", "),
                info.description.clone(),
            ]
        })
        .collect();
    common::print_table(&["NAME", "KIND", "COLUMNS", "DESCRIPTION"], &rows);
    println!("\n{} queries", infos.len());
    Ok(())
}
