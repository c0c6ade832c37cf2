//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::similarity::MatchPolicy;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Similarity above which two problems are considered `similar`
pub const DEFAULT_SIMILAR_THRESHOLD: f64 = 0.7;

/// Fixed score reported for same-problem, different-methods matches
pub const DEFAULT_DIFFERENT_METHODS_SCORE: f64 = 0.9;

/// Raw score that maps to 100% confidence
pub const CONFIDENCE_CEILING: f64 = 50.0;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Deduplication policy
    #[serde(default)]
    pub dedup: DedupConfig,

    /// Category recommendation weights
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// Deduplication settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Problems must be strictly more similar than this to count as `similar`
    #[serde(default = "default_similar_threshold")]
    pub similar_threshold: f64,

    /// Score attached to `different_methods` matches
    #[serde(default = "default_different_methods_score")]
    pub different_methods_score: f64,

    /// How the existing collection is scanned for each candidate
    #[serde(default)]
    pub policy: MatchPolicy,
}

/// Per-occurrence points for the three keyword tiers within one text channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPoints {
    pub core: f64,
    pub related: f64,
    pub high_weight: f64,
    /// Channel weight applied to the subtotal
    pub weight: f64,
}

impl TierPoints {
    /// Title channel defaults
    pub const TITLE: TierPoints = TierPoints {
        core: 10.0,
        related: 5.0,
        high_weight: 15.0,
        weight: 0.4,
    };

    /// Summary/description channel defaults
    pub const SUMMARY: TierPoints = TierPoints {
        core: 2.0,
        related: 1.0,
        high_weight: 5.0,
        weight: 0.3,
    };
}

/// Per-occurrence points for the fields of a structured analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPoints {
    pub topic_core: f64,
    pub keywords_core: f64,
    pub keywords_high_weight: f64,
    pub methods_core: f64,
    pub summary_core: f64,
    /// Channel weight applied to the subtotal
    pub weight: f64,
}

impl Default for AnalysisPoints {
    fn default() -> Self {
        AnalysisPoints {
            topic_core: 5.0,
            keywords_core: 3.0,
            keywords_high_weight: 5.0,
            methods_core: 2.0,
            summary_core: 1.0,
            weight: 0.2,
        }
    }
}

/// Category recommendation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Raw score mapped to 100% confidence
    #[serde(default = "default_confidence_ceiling")]
    pub confidence_ceiling: f64,

    /// Catalog file (TOML or JSON); the built-in catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    #[serde(default = "default_title_points")]
    pub title: TierPoints,

    #[serde(default = "default_summary_points")]
    pub summary: TierPoints,

    #[serde(default)]
    pub analysis: AnalysisPoints,

    /// Weight applied to content-type/source rule bonuses
    #[serde(default = "default_content_weight")]
    pub content_weight: f64,
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_similar_threshold() -> f64 {
    DEFAULT_SIMILAR_THRESHOLD
}

fn default_different_methods_score() -> f64 {
    DEFAULT_DIFFERENT_METHODS_SCORE
}

fn default_confidence_ceiling() -> f64 {
    CONFIDENCE_CEILING
}

fn default_title_points() -> TierPoints {
    TierPoints::TITLE
}

fn default_summary_points() -> TierPoints {
    TierPoints::SUMMARY
}

fn default_content_weight() -> f64 {
    0.1
}

impl Default for DedupConfig {
    fn default() -> Self {
        DedupConfig {
            similar_threshold: default_similar_threshold(),
            different_methods_score: default_different_methods_score(),
            policy: MatchPolicy::default(),
        }
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        RecommendConfig {
            confidence_ceiling: default_confidence_ceiling(),
            catalog: None,
            title: default_title_points(),
            summary: default_summary_points(),
            analysis: AnalysisPoints::default(),
            content_weight: default_content_weight(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            version: CONFIG_FORMAT_VERSION,
            dedup: DedupConfig::default(),
            recommend: RecommendConfig::default(),
        }
    }
}
