//! `kpoint categories` - list the active catalog or validate a catalog file

use std::path::Path;

use kpoint_core::category::{CategoryCatalog, CategoryInfo, CategoryRecommender};
use kpoint_core::error::{KpointError, Result};
use kpoint_core::records::{escape_quotes, format_header};

use crate::cli::{CategoriesArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext, args: &CategoriesArgs) -> Result<()> {
    match &args.check {
        Some(path) => check(ctx, path),
        None => list(ctx),
    }
}

fn list(ctx: &CommandContext) -> Result<()> {
    let recommender = ctx.recommender()?;
    let categories = recommender.categories();

    match ctx.cli.format {
        OutputFormat::Human => {
            if categories.is_empty() {
                if !ctx.cli.quiet {
                    println!("No categories");
                }
                return Ok(());
            }
            for category in &categories {
                println!("{:>3}  {} ({})", category.id, category.name, category.name_en);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header("categories", &[("count", categories.len().to_string())])
            );
            for category in &categories {
                println!("{}", category_record(category));
            }
        }
    }
    Ok(())
}

fn category_record(category: &CategoryInfo) -> String {
    format!(
        "C {} \"{}\" \"{}\"",
        category.id,
        escape_quotes(&category.name),
        escape_quotes(&category.name_en)
    )
}

/// Validate structure, then compile every keyword pattern
fn check(ctx: &CommandContext, path: &Path) -> Result<()> {
    let catalog = CategoryCatalog::load(path)?;
    let categories = catalog.len();
    let rules = catalog.content_rules.len();

    let recommender = CategoryRecommender::new(catalog, Default::default());
    let invalid = recommender.invalid_categories();
    if let Some((id, reason)) = invalid.first() {
        return Err(KpointError::invalid_catalog(format!(
            "category {} in {}: {}",
            id,
            path.display(),
            reason
        )));
    }

    match ctx.cli.format {
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "{}: ok ({} categories, {} content rules)",
                    path.display(),
                    categories,
                    rules
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path.display().to_string(),
                "valid": true,
                "categories": categories,
                "contentRules": rules,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Records => {
            println!(
                "{}",
                format_header(
                    "check",
                    &[
                        ("valid", "true".to_string()),
                        ("categories", categories.to_string()),
                        ("rules", rules.to_string()),
                    ],
                )
            );
        }
    }
    Ok(())
}
