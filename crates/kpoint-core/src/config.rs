//! Engine configuration for kpoint
//!
//! Configuration lives in a TOML file. Every field has a default, so an
//! absent file or an empty file yields the stock engine behavior.

pub mod global;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_invalid;
use crate::error::{KpointError, Result};

pub use types::{
    AnalysisPoints, DedupConfig, EngineConfig, RecommendConfig, TierPoints, CONFIDENCE_CEILING,
    CONFIG_FORMAT_VERSION, DEFAULT_DIFFERENT_METHODS_SCORE, DEFAULT_SIMILAR_THRESHOLD,
};

impl EngineConfig {
    /// Load configuration from a file
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| KpointError::io_operation("read config", path.display(), e))?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(policy = %config.dedup.policy, "config_loaded");
        Ok(config)
    }

    /// Load from an explicit path, else the global location, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = global::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| KpointError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| KpointError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Configured catalog path; a relative path is taken from the directory
    /// holding `config_file`
    pub fn catalog_path(&self, config_file: Option<&Path>) -> Option<PathBuf> {
        let catalog = Path::new(self.recommend.catalog.as_deref()?);
        let base = config_file.and_then(Path::parent);
        match base {
            Some(dir) if catalog.is_relative() => Some(dir.join(catalog)),
            _ => Some(catalog.to_path_buf()),
        }
    }

    /// Reject values that would make the engines meaningless
    pub fn validate(&self) -> Result<()> {
        if self.version > CONFIG_FORMAT_VERSION {
            bail_invalid!("config version", self.version);
        }

        let dedup = &self.dedup;
        if !(0.0..=1.0).contains(&dedup.similar_threshold) {
            bail_invalid!("dedup.similar_threshold", dedup.similar_threshold);
        }
        if !(0.0..=1.0).contains(&dedup.different_methods_score) {
            bail_invalid!(
                "dedup.different_methods_score",
                dedup.different_methods_score
            );
        }

        let recommend = &self.recommend;
        if !(recommend.confidence_ceiling.is_finite() && recommend.confidence_ceiling > 0.0) {
            bail_invalid!(
                "recommend.confidence_ceiling",
                recommend.confidence_ceiling
            );
        }

        let a = &recommend.analysis;
        let weights = [
            ("recommend.title", recommend.title.weight),
            ("recommend.summary", recommend.summary.weight),
            ("recommend.analysis", a.weight),
            ("recommend.content_weight", recommend.content_weight),
        ];
        for (context, weight) in weights {
            if !(weight.is_finite() && weight >= 0.0) {
                bail_invalid!(context, weight);
            }
        }

        Ok(())
    }
}
