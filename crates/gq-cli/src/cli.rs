//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Gallery Query - load the painting dataset and run named analytical queries
#[derive(Parser, Debug)]
#[command(name = "gq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (database connection); falls back to GQ_TARGET
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load CSV sources into the store, replacing existing tables
    Load(LoadArgs),

    /// Execute named queries from the catalog
    Query(QueryArgs),

    /// List the queries in the catalog
    List(ListArgs),
}

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Source names to load (comma-separated, default: the configured sources)
    #[arg(short, long, conflicts_with = "all")]
    pub sources: Option<String>,

    /// Load every CSV file found in the data directory
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Query names to execute, in order
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub names: Vec<String>,

    /// Execute every read-only query
    #[arg(long)]
    pub all: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
