use std::path::PathBuf;

use clap::Args;

use super::parse::parse_unit_interval;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Problem statement of the first knowledge point
    pub problem_a: String,

    /// Problem statement of the second knowledge point
    pub problem_b: String,

    /// Method of the first knowledge point (can be specified multiple times)
    #[arg(long = "method-a", action = clap::ArgAction::Append)]
    pub method_a: Vec<String>,

    /// Method of the second knowledge point (can be specified multiple times)
    #[arg(long = "method-b", action = clap::ArgAction::Append)]
    pub method_b: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DedupArgs {
    /// JSON array of candidate knowledge points ("-" for stdin)
    #[arg(long)]
    pub candidates: PathBuf,

    /// JSON array of existing knowledge points ("-" for stdin)
    #[arg(long)]
    pub existing: PathBuf,

    /// Similarity threshold for the similar bucket (exclusive)
    #[arg(long, value_parser = parse_unit_interval)]
    pub threshold: Option<f64>,

    /// Keep the most specific match instead of the first one
    #[arg(long)]
    pub best_match: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Item title
    #[arg(long, short)]
    pub title: String,

    /// Item summary
    #[arg(long, short)]
    pub summary: Option<String>,

    /// JSON file with structured analysis (topic, keywords, methods, summary)
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    /// Content type, e.g. "video" or "article"
    #[arg(long)]
    pub content_type: Option<String>,

    /// Content source, e.g. "bilibili" or "youtube"
    #[arg(long)]
    pub source: Option<String>,

    /// Also list categories that were not recommended
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    /// Validate a catalog file instead of listing the active catalog
    #[arg(long)]
    pub check: Option<PathBuf>,
}
