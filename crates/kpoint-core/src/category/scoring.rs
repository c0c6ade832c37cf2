//! Keyword pattern compilation and per-channel scoring

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::category::catalog::{CategoryDefinition, ContentRule, MatchMode, RuleField};
use crate::config::{RecommendConfig, TierPoints};
use crate::knowledge::null_as_default;

/// Structured analysis produced upstream for an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Item signals scored against every category
#[derive(Debug, Clone, Copy, Default)]
pub struct Signals<'a> {
    pub title: &'a str,
    pub summary: Option<&'a str>,
    pub analysis: Option<&'a Analysis>,
    pub content_type: Option<&'a str>,
    pub source: Option<&'a str>,
}

/// Weighted per-channel scores for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total: f64,
    pub title_score: f64,
    pub summary_score: f64,
    pub llm_score: f64,
    pub content_score: f64,
}

/// Compiled keyword tier
#[derive(Debug, Clone, Default)]
struct Tier(Vec<Regex>);

impl Tier {
    /// Total occurrences of every keyword in `text`
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.0.iter().map(|re| re.find_iter(text).count()).sum()
    }
}

/// A category with its keyword patterns compiled once
#[derive(Debug, Clone)]
pub(crate) struct CompiledCategory {
    pub definition: CategoryDefinition,
    core: Tier,
    related: Tier,
    high_weight: Tier,
    /// Set when a keyword failed to compile; the category then scores zero
    pub error: Option<String>,
}

impl CompiledCategory {
    pub fn compile(definition: &CategoryDefinition) -> Self {
        let tiers = compile_tier(&definition.core_keywords, definition.match_mode)
            .and_then(|core| {
                let related = compile_tier(&definition.related_keywords, definition.match_mode)?;
                let high = compile_tier(&definition.high_weight_keywords, definition.match_mode)?;
                Ok((core, related, high))
            });

        match tiers {
            Ok((core, related, high_weight)) => CompiledCategory {
                definition: definition.clone(),
                core,
                related,
                high_weight,
                error: None,
            },
            Err(reason) => {
                tracing::warn!(
                    category = definition.id,
                    name = %definition.name_en,
                    %reason,
                    "invalid keyword pattern, category will score zero"
                );
                CompiledCategory {
                    definition: definition.clone(),
                    core: Tier::default(),
                    related: Tier::default(),
                    high_weight: Tier::default(),
                    error: Some(reason),
                }
            }
        }
    }

    /// Score this category against the item signals
    pub fn score(
        &self,
        signals: &Signals<'_>,
        rules: &[ContentRule],
        config: &RecommendConfig,
    ) -> ScoreBreakdown {
        if self.error.is_some() {
            return ScoreBreakdown::default();
        }

        let title_score = self.tier_score(signals.title, &config.title);
        let summary_score = signals
            .summary
            .map_or(0.0, |summary| self.tier_score(summary, &config.summary));
        let llm_score = signals
            .analysis
            .map_or(0.0, |analysis| self.analysis_score(analysis, config));
        let content_score = self.content_score(signals, rules) * config.content_weight;

        ScoreBreakdown {
            total: title_score + summary_score + llm_score + content_score,
            title_score,
            summary_score,
            llm_score,
            content_score,
        }
    }

    fn tier_score(&self, text: &str, points: &TierPoints) -> f64 {
        let raw = self.core.count(text) as f64 * points.core
            + self.related.count(text) as f64 * points.related
            + self.high_weight.count(text) as f64 * points.high_weight;
        raw * points.weight
    }

    fn analysis_score(&self, analysis: &Analysis, config: &RecommendConfig) -> f64 {
        let points = &config.analysis;
        let mut raw = 0.0;

        if let Some(topic) = analysis.topic.as_deref() {
            raw += self.core.count(topic) as f64 * points.topic_core;
        }

        let keywords = analysis.keywords.join(" ");
        raw += self.core.count(&keywords) as f64 * points.keywords_core;
        raw += self.high_weight.count(&keywords) as f64 * points.keywords_high_weight;

        let methods = analysis.methods.join(" ");
        raw += self.core.count(&methods) as f64 * points.methods_core;

        if let Some(summary) = analysis.summary.as_deref() {
            raw += self.core.count(summary) as f64 * points.summary_core;
        }

        raw * points.weight
    }

    /// Unweighted bonus from the content-type/source rule table
    fn content_score(&self, signals: &Signals<'_>, rules: &[ContentRule]) -> f64 {
        rules
            .iter()
            .map(|rule| {
                let value = match rule.field {
                    RuleField::ContentType => signals.content_type,
                    RuleField::Source => signals.source,
                };
                value.map_or(0.0, |v| rule.points_for(self.definition.id, v))
            })
            .sum()
    }
}

/// Compile one keyword into a case-insensitive pattern
///
/// Literal keywords are escaped. Patterns that match the empty string are
/// rejected since they would count a hit at every position.
pub(crate) fn compile_keyword(keyword: &str, mode: MatchMode) -> Result<Regex, String> {
    if keyword.is_empty() {
        return Err("empty keyword".to_string());
    }

    let pattern = match mode {
        MatchMode::Literal => regex::escape(keyword),
        MatchMode::Regex => keyword.to_string(),
    };

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| format!("keyword {:?}: {}", keyword, e))?;

    if regex.is_match("") {
        return Err(format!("keyword {:?} matches empty text", keyword));
    }
    Ok(regex)
}

fn compile_tier(keywords: &[String], mode: MatchMode) -> Result<Tier, String> {
    keywords
        .iter()
        .map(|keyword| compile_keyword(keyword, mode))
        .collect::<Result<Vec<_>, _>>()
        .map(Tier)
}
