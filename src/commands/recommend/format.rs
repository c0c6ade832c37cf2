//! Output formatting for the recommend command

use kpoint_core::category::{CategoryRecommender, RecommendationResult, ScoreBreakdown};
use kpoint_core::records::{format_audit, format_header, format_recommendation};

use crate::cli::{Cli, RecommendArgs};

pub fn output_human(
    cli: &Cli,
    recommender: &CategoryRecommender,
    result: &RecommendationResult,
    args: &RecommendArgs,
) {
    if result.recommended.is_empty() {
        if !cli.quiet {
            println!("No matching categories for \"{}\"", args.title);
        }
    } else {
        if !cli.quiet {
            println!(
                "Recommended {} of {} categories for \"{}\"",
                result.recommended_count, result.total_categories, args.title
            );
        }
        for (rank, r) in result.recommended.iter().enumerate() {
            println!(
                "{:>2}. {} ({})  score {:.1}  confidence {}%",
                rank + 1,
                r.category_name,
                r.category_name_en,
                r.score,
                r.confidence
            );
            if !cli.quiet {
                println!("    {}", breakdown_line(&r.details));
            }
        }
    }

    if !args.all || cli.quiet {
        return;
    }

    println!();
    println!("All categories:");
    for score in &result.all_scores {
        let name = recommender
            .category(score.category_id)
            .map_or("?", |c| c.name_en.as_str());
        match &score.error {
            Some(error) => println!("  {:>3} {:<12} skipped: {}", score.category_id, name, error),
            None => println!(
                "  {:>3} {:<12} {:>6.1}  {}",
                score.category_id,
                name,
                score.score,
                breakdown_line(&score.details)
            ),
        }
    }
}

fn breakdown_line(details: &ScoreBreakdown) -> String {
    format!(
        "title {:.1}, summary {:.1}, analysis {:.1}, content {:.1}",
        details.title_score, details.summary_score, details.llm_score, details.content_score
    )
}

pub fn output_records(result: &RecommendationResult, all: bool) {
    println!(
        "{}",
        format_header(
            "recommend",
            &[
                ("categories", result.total_categories.to_string()),
                ("recommended", result.recommended_count.to_string()),
            ],
        )
    );
    for (rank, r) in result.recommended.iter().enumerate() {
        println!("{}", format_recommendation(rank + 1, r));
    }

    if all {
        for score in &result.all_scores {
            let recommended = result
                .recommended
                .iter()
                .any(|r| r.category_id == score.category_id);
            if !recommended {
                println!("{}", format_audit(score));
            }
        }
    }
}
