//! Query command implementation

use anyhow::{Context, Result};
use gq_catalog::{CatalogError, CatalogResult, QueryCatalog};
use gq_core::ResultSet;

use crate::cli::{GlobalArgs, QueryArgs};
use crate::commands::common::{self, ExitCode, EXIT_DATABASE_ERROR};

/// Execute the query command
pub(crate) async fn execute(args: &QueryArgs, global: &GlobalArgs) -> Result<()> {
    let catalog = QueryCatalog::builtin();

    // Reject unknown names before touching the store.
    for name in &args.names {
        if catalog.get(name).is_none() {
            return Err(CatalogError::UnknownQuery { name: name.clone() })
                .context("Run `gq list` to see the available queries");
        }
    }

    let project = common::load_project(global)?;
    let mut session = common::session(&project, global)?;
    let db = session.database().context("Failed to connect to database")?;

    let outcomes: Vec<(String, CatalogResult<ResultSet>)> = if args.all {
        catalog
            .execute_all_reads(db)
            .await
            .into_iter()
            .map(|(query, result)| (query.name.to_string(), result))
            .collect()
    } else {
        let mut outcomes = Vec::with_capacity(args.names.len());
        for name in &args.names {
            outcomes.push((name.clone(), catalog.execute(db, name).await));
        }
        outcomes
    };

    let mut results: Vec<(&str, &ResultSet)> = Vec::with_capacity(outcomes.len());
    let mut failures = 0;
    for (name, outcome) in &outcomes {
        match outcome {
            Ok(rs) => results.push((name.as_str(), rs)),
            Err(e) => {
                failures += 1;
                eprintln!("✗ {}", e);
            }
        }
    }

    if args.json {
        print_json(&results)?;
    } else {
        for (i, (name, rs)) in results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("== {} ==", name);
            common::print_result_set(rs);
        }
    }

    session.close();
    if failures > 0 {
        return Err(ExitCode(EXIT_DATABASE_ERROR).into());
    }
    Ok(())
}

/// `[{"query": name, "columns": [...], "rows": [{column: value}, ...]}, ...]`
fn print_json(results: &[(&str, &ResultSet)]) -> Result<()> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|(name, rs)| {
            serde_json::json!({
                "query": name,
                "columns": rs.columns,
                "rows": rs.to_json_records(),
            })
        })
        .collect();
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}
