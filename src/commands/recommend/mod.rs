//! `kpoint recommend` - recommend catalog categories for a content item

mod format;

use kpoint_core::category::{Analysis, Signals};
use kpoint_core::error::Result;
use kpoint_core::trace_time;

use crate::cli::{OutputFormat, RecommendArgs};
use crate::commands::dispatch::CommandContext;
use crate::commands::input::read_json;

pub fn execute(ctx: &CommandContext, args: &RecommendArgs) -> Result<()> {
    let recommender = ctx.recommender()?;
    for (id, reason) in recommender.invalid_categories() {
        tracing::warn!(category = id, %reason, "category skipped");
    }

    let analysis: Option<Analysis> = args
        .analysis
        .as_deref()
        .map(read_json::<Analysis>)
        .transpose()?;

    let signals = Signals {
        title: &args.title,
        summary: args.summary.as_deref(),
        analysis: analysis.as_ref(),
        content_type: args.content_type.as_deref(),
        source: args.source.as_deref(),
    };
    let result = recommender.recommend_signals(&signals);
    trace_time!(ctx.start, "recommend", recommended = result.recommended_count);

    match ctx.cli.format {
        OutputFormat::Human => format::output_human(ctx.cli, &recommender, &result, args),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Records => format::output_records(&result, args.all),
    }
    Ok(())
}
