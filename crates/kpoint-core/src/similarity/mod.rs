//! Similarity engine for classifying knowledge points against a knowledge base
//!
//! Pairwise comparison checks, in order: identical problem and method
//! multiset, identical problem only, then edit-distance similarity of the
//! problems. Batch deduplication files each candidate into exactly one of
//! four buckets.

mod comparison;

mod duplicates;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DedupConfig;
use crate::error::KpointError;
use crate::knowledge::KnowledgePoint;

pub use duplicates::{DedupSummary, DeduplicationResult, DuplicateMatch};

/// Relationship between a candidate and an existing knowledge point
///
/// Ordered by specificity: `Identical > DifferentMethods > Similar > Different`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Different,
    Similar,
    DifferentMethods,
    Identical,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Different => "different",
            Relationship::Similar => "similar",
            Relationship::DifferentMethods => "different_methods",
            Relationship::Identical => "identical",
        }
    }

    /// Whether this relationship files a candidate against an existing item
    pub fn is_match(&self) -> bool {
        *self != Relationship::Different
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a pairwise comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(rename = "type")]
    pub relationship: Relationship,
    /// Similarity score (0.0 to 1.0)
    pub score: f64,
}

impl ComparisonResult {
    pub const DIFFERENT: ComparisonResult = ComparisonResult {
        relationship: Relationship::Different,
        score: 0.0,
    };
}

/// How the existing collection is scanned for each candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Stop at the first existing item with a non-`different` relationship
    #[default]
    FirstMatch,
    /// Keep the most specific relationship across all existing items,
    /// breaking ties by score, then by earliest position
    BestMatch,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::FirstMatch => write!(f, "first-match"),
            MatchPolicy::BestMatch => write!(f, "best-match"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = KpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-match" => Ok(MatchPolicy::FirstMatch),
            "best-match" => Ok(MatchPolicy::BestMatch),
            other => Err(KpointError::unsupported(
                "match policy",
                other,
                "first-match, best-match",
            )),
        }
    }
}

/// Similarity Engine
///
/// Stateless apart from its policy constants; cheap to construct and safe
/// to share between threads.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: DedupConfig,
}

impl SimilarityEngine {
    /// Create a new Similarity Engine
    pub fn new(config: DedupConfig) -> Self {
        SimilarityEngine { config }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Classify the relationship between two knowledge points
    pub fn compare(&self, a: &KnowledgePoint, b: &KnowledgePoint) -> ComparisonResult {
        comparison::compare(a, b, &self.config)
    }

    /// Partition candidates against the existing knowledge base
    pub fn deduplicate(
        &self,
        candidates: &[KnowledgePoint],
        existing: &[KnowledgePoint],
    ) -> DeduplicationResult {
        duplicates::deduplicate(candidates, existing, &self.config)
    }
}

/// Compare two knowledge points with the default policy constants
pub fn compare(a: &KnowledgePoint, b: &KnowledgePoint) -> ComparisonResult {
    comparison::compare(a, b, &DedupConfig::default())
}

/// Deduplicate with the default policy (first match, threshold 0.7)
pub fn deduplicate(candidates: &[KnowledgePoint], existing: &[KnowledgePoint]) -> DeduplicationResult {
    duplicates::deduplicate(candidates, existing, &DedupConfig::default())
}

#[cfg(test)]
mod tests;
