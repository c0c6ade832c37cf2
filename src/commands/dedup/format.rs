//! Output formatting for the dedup command

use kpoint_core::config::DedupConfig;
use kpoint_core::error::Result;
use kpoint_core::records::{format_header, format_match, format_new};
use kpoint_core::similarity::{DeduplicationResult, Relationship};

use crate::cli::Cli;

/// Buckets in display order
const MATCHED: [(Relationship, &str); 3] = [
    (Relationship::Identical, "Identical"),
    (Relationship::DifferentMethods, "Different methods"),
    (Relationship::Similar, "Similar"),
];

pub fn output_human(cli: &Cli, result: &DeduplicationResult, existing: usize) {
    let summary = result.summary();
    println!(
        "{} candidates against {} existing: {} identical, {} different methods, {} similar, {} new",
        summary.total(),
        existing,
        summary.identical,
        summary.different_methods,
        summary.similar,
        summary.new
    );
    if cli.quiet {
        return;
    }

    for (relationship, heading) in MATCHED {
        let matches = result.matches(relationship);
        if matches.is_empty() {
            continue;
        }
        println!();
        println!("{}:", heading);
        for m in matches {
            println!(
                "  {} -> #{} {} ({:.2})",
                m.new.problem_text(),
                m.existing_index,
                m.existing.problem_text(),
                m.similarity
            );
        }
    }

    if !result.new.is_empty() {
        println!();
        println!("New:");
        for point in &result.new {
            println!("  {}", point.problem_text());
        }
    }
}

pub fn output_json(result: &DeduplicationResult) -> Result<()> {
    let mut output = serde_json::to_value(result)?;
    if let Some(obj) = output.as_object_mut() {
        obj.insert("summary".to_string(), serde_json::to_value(result.summary())?);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_records(result: &DeduplicationResult, config: &DedupConfig) {
    let summary = result.summary();
    println!(
        "{}",
        format_header(
            "dedup",
            &[
                ("policy", config.policy.to_string()),
                ("threshold", config.similar_threshold.to_string()),
                ("candidates", summary.total().to_string()),
                ("identical", summary.identical.to_string()),
                ("different_methods", summary.different_methods.to_string()),
                ("similar", summary.similar.to_string()),
                ("new", summary.new.to_string()),
            ],
        )
    );

    for (relationship, _) in MATCHED {
        for m in result.matches(relationship) {
            println!("{}", format_match(relationship, m));
        }
    }
    for point in &result.new {
        println!("{}", format_new(point));
    }
}
