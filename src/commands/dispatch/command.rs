//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands;
use kpoint_core::category::{CategoryCatalog, CategoryRecommender};
use kpoint_core::config::{global, EngineConfig};
use kpoint_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Engine configuration from --config, the global file, or defaults
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let config = EngineConfig::resolve(self.cli.config.as_deref())?;
        match &self.cli.config {
            Some(path) => debug!(path = %path.display(), elapsed = ?self.start.elapsed(), "load_config"),
            None => debug!(source = %global::source_display(), elapsed = ?self.start.elapsed(), "load_config"),
        }
        Ok(config)
    }

    /// Config file in effect, if any
    fn config_file(&self) -> Option<PathBuf> {
        match &self.cli.config {
            Some(path) => Some(path.clone()),
            None => global::config_path().ok().filter(|path| path.exists()),
        }
    }

    /// Catalog from --catalog, else the configured path, else the built-in one
    pub fn catalog(&self, config: &EngineConfig) -> Result<CategoryCatalog> {
        let path = match &self.cli.catalog {
            Some(path) => Some(path.clone()),
            None => config.catalog_path(self.config_file().as_deref()),
        };
        let catalog = CategoryCatalog::load_or_builtin(path.as_deref())?;
        debug!(
            categories = catalog.len(),
            builtin = path.is_none(),
            elapsed = ?self.start.elapsed(),
            "load_catalog"
        );
        Ok(catalog)
    }

    /// Recommender over the resolved catalog and configuration
    pub fn recommender(&self) -> Result<CategoryRecommender> {
        let config = self.engine_config()?;
        let catalog = self.catalog(&config)?;
        Ok(CategoryRecommender::new(catalog, config.recommend))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("kpoint {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Deduplicate knowledge points and recommend categories.");
        println!();
        println!("Run `kpoint --help` for usage information.");
        Ok(())
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Compare(args) => commands::compare::execute(ctx, args),
            Commands::Dedup(args) => commands::dedup::execute(ctx, args),
            Commands::Recommend(args) => commands::recommend::execute(ctx, args),
            Commands::Categories(args) => commands::categories::execute(ctx, args),
        }
    }
}
