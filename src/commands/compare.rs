//! `kpoint compare` - classify the relationship between two knowledge points

use kpoint_core::error::Result;
use kpoint_core::knowledge::KnowledgePoint;
use kpoint_core::records::{format_comparison, format_header};
use kpoint_core::similarity::{ComparisonResult, SimilarityEngine};
use kpoint_core::trace_time;

use crate::cli::{CompareArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext, args: &CompareArgs) -> Result<()> {
    let config = ctx.engine_config()?;
    let engine = SimilarityEngine::new(config.dedup);

    let a = KnowledgePoint::new(args.problem_a.as_str(), args.method_a.iter().cloned());
    let b = KnowledgePoint::new(args.problem_b.as_str(), args.method_b.iter().cloned());
    let result = engine.compare(&a, &b);
    trace_time!(ctx.start, "compare");

    match ctx.cli.format {
        OutputFormat::Human => output_human(&result),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Records => {
            println!("{}", format_header("compare", &[]));
            println!("{}", format_comparison(&result));
        }
    }
    Ok(())
}

fn output_human(result: &ComparisonResult) {
    println!("{} (score {:.2})", result.relationship, result.score);
}
