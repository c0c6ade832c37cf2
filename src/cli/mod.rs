//! CLI argument parsing for kpoint
//!
//! Global flags: --config, --catalog, --format, --quiet, --verbose

pub mod args;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{CategoriesArgs, CompareArgs, DedupArgs, RecommendArgs};
pub use kpoint_core::format::OutputFormat;
use parse::parse_format;

/// Kpoint - deduplicate knowledge points and recommend categories
#[derive(Parser, Debug)]
#[command(name = "kpoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Engine configuration file (default: ~/.config/kpoint/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Category catalog file, TOML or JSON (default: built-in catalog)
    #[arg(long, global = true, env = "KPOINT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_parser = parse_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "kpoint_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two knowledge points
    Compare(CompareArgs),

    /// Classify candidate knowledge points against an existing collection
    Dedup(DedupArgs),

    /// Recommend categories for a content item
    Recommend(RecommendArgs),

    /// List catalog categories or validate a catalog file
    Categories(CategoriesArgs),
}
