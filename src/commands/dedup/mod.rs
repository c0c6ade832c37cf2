//! `kpoint dedup` - file candidates into identical / different methods /
//! similar / new against an existing collection

mod format;

use kpoint_core::bail_usage;
use kpoint_core::error::Result;
use kpoint_core::similarity::{MatchPolicy, SimilarityEngine};
use kpoint_core::trace_time;

use crate::cli::{DedupArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::input::{is_stdin, read_points};

pub fn execute(ctx: &CommandContext, args: &DedupArgs) -> Result<()> {
    if is_stdin(&args.candidates) && is_stdin(&args.existing) {
        bail_usage!("only one of --candidates and --existing can read from stdin");
    }

    let mut config = ctx.engine_config()?.dedup;
    if let Some(threshold) = args.threshold {
        config.similar_threshold = threshold;
    }
    if args.best_match {
        config.policy = MatchPolicy::BestMatch;
    }

    let candidates = read_points(&args.candidates)?;
    let existing = read_points(&args.existing)?;
    trace_time!(
        ctx.start,
        "read_inputs",
        candidates = candidates.len(),
        existing = existing.len()
    );

    let engine = SimilarityEngine::new(config);
    let result = engine.deduplicate(&candidates, &existing);
    trace_time!(ctx.start, "deduplicate");

    match ctx.cli.format {
        OutputFormat::Human => format::output_human(ctx.cli, &result, existing.len()),
        OutputFormat::Json => format::output_json(&result)?,
        OutputFormat::Records => format::output_records(&result, engine.config()),
    }
    Ok(())
}
