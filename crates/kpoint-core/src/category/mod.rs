//! Category recommendation engine
//!
//! Every category in the catalog is scored against four weighted signal
//! channels (title, summary, structured analysis, content metadata). The
//! number of categories recommended shrinks as the top score grows: a
//! strong match yields one confident category, a weak one a longer list.

pub mod catalog;

mod scoring;

use serde::{Deserialize, Serialize};

use crate::config::RecommendConfig;
use crate::error::Result;

pub use catalog::{
    CategoryCatalog, CategoryDefinition, CategoryId, ContentRule, MatchMode, RuleField,
    CATALOG_FORMAT_VERSION,
};
pub use scoring::{Analysis, ScoreBreakdown, Signals};

use scoring::CompiledCategory;

/// Catalog identity of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: CategoryId,
    pub name: String,
    pub name_en: String,
}

/// Audit entry for one category, recommended or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category_id: CategoryId,
    /// Unrounded total
    pub score: f64,
    pub confidence: u8,
    pub details: ScoreBreakdown,
    /// Why the category could not be scored, if it could not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A recommended category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_name_en: String,
    /// Total rounded to one decimal
    pub score: f64,
    pub confidence: u8,
    pub details: ScoreBreakdown,
}

/// Ranked recommendations plus the full per-category audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub recommended: Vec<Recommendation>,
    /// Every category in catalog order
    pub all_scores: Vec<CategoryScore>,
    pub total_categories: usize,
    pub recommended_count: usize,
}

/// Scores items against an immutable, pre-compiled catalog
#[derive(Debug, Clone)]
pub struct CategoryRecommender {
    categories: Vec<CompiledCategory>,
    rules: Vec<ContentRule>,
    config: RecommendConfig,
}

impl CategoryRecommender {
    /// Compile the catalog's keyword patterns
    ///
    /// Categories whose keywords fail to compile are kept but always score
    /// zero; the failure is logged and reported in the audit block.
    pub fn new(catalog: CategoryCatalog, config: RecommendConfig) -> Self {
        let categories = catalog
            .categories
            .iter()
            .map(CompiledCategory::compile)
            .collect();
        CategoryRecommender {
            categories,
            rules: catalog.content_rules,
            config,
        }
    }

    /// Recommender over the built-in catalog with default weights
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            CategoryCatalog::builtin()?,
            RecommendConfig::default(),
        ))
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.categories
            .iter()
            .map(|c| &c.definition)
            .find(|d| d.id == id)
    }

    /// All categories in catalog order
    pub fn categories(&self) -> Vec<CategoryInfo> {
        self.categories
            .iter()
            .map(|c| CategoryInfo {
                id: c.definition.id,
                name: c.definition.name.clone(),
                name_en: c.definition.name_en.clone(),
            })
            .collect()
    }

    /// Categories whose keywords failed to compile, with the reason
    pub fn invalid_categories(&self) -> Vec<(CategoryId, &str)> {
        self.categories
            .iter()
            .filter_map(|c| c.error.as_deref().map(|e| (c.definition.id, e)))
            .collect()
    }

    /// Score one category, or `None` if the id is not in the catalog
    pub fn score_category(&self, id: CategoryId, signals: &Signals<'_>) -> Option<ScoreBreakdown> {
        self.categories
            .iter()
            .find(|c| c.definition.id == id)
            .map(|c| c.score(signals, &self.rules, &self.config))
    }

    /// Recommend categories for an item
    pub fn recommend(
        &self,
        title: &str,
        summary: Option<&str>,
        analysis: Option<&Analysis>,
        content_type: Option<&str>,
        source: Option<&str>,
    ) -> RecommendationResult {
        self.recommend_signals(&Signals {
            title,
            summary,
            analysis,
            content_type,
            source,
        })
    }

    #[tracing::instrument(skip_all, fields(categories = self.categories.len()))]
    pub fn recommend_signals(&self, signals: &Signals<'_>) -> RecommendationResult {
        let all_scores: Vec<CategoryScore> = self
            .categories
            .iter()
            .map(|category| {
                let details = category.score(signals, &self.rules, &self.config);
                CategoryScore {
                    category_id: category.definition.id,
                    score: details.total,
                    confidence: confidence(details.total, self.config.confidence_ceiling),
                    details,
                    error: category.error.clone(),
                }
            })
            .collect();

        let mut ranked: Vec<(&CompiledCategory, &CategoryScore)> = self
            .categories
            .iter()
            .zip(all_scores.iter())
            .filter(|(_, score)| score.score > 0.0)
            .collect();
        // Stable: ties keep catalog order
        ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));

        let top = ranked.first().map_or(0.0, |(_, score)| score.score);
        let count = recommended_count(top, ranked.len());

        let recommended: Vec<Recommendation> = ranked
            .iter()
            .take(count)
            .map(|(category, score)| Recommendation {
                category_id: category.definition.id,
                category_name: category.definition.name.clone(),
                category_name_en: category.definition.name_en.clone(),
                score: round_one_decimal(score.score),
                confidence: score.confidence,
                details: score.details,
            })
            .collect();

        tracing::debug!(
            top_score = top,
            positive = ranked.len(),
            recommended = recommended.len(),
            "recommended"
        );

        RecommendationResult {
            recommended_count: recommended.len(),
            total_categories: self.categories.len(),
            all_scores,
            recommended,
        }
    }
}

/// How many categories to recommend for a given top score
///
/// Never exceeds `available`, the number of positively scored categories.
pub fn recommended_count(top_score: f64, available: usize) -> usize {
    let count = if top_score > 30.0 {
        1
    } else if top_score > 20.0 {
        2
    } else if top_score > 10.0 {
        3
    } else if top_score > 5.0 {
        5
    } else if top_score > 0.0 {
        available
    } else {
        0
    };
    count.min(available)
}

/// Rescale a raw score to 0-100 against `ceiling`
pub fn confidence(score: f64, ceiling: f64) -> u8 {
    let pct = (score / ceiling * 100.0).clamp(0.0, 100.0);
    pct.round() as u8
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
