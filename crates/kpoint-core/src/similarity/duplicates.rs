use serde::{Deserialize, Serialize};

use crate::config::DedupConfig;
use crate::knowledge::KnowledgePoint;
use crate::similarity::{comparison, ComparisonResult, MatchPolicy, Relationship};

/// Existing item matched by a scan: position, record, comparison
type Found<'a> = (usize, &'a KnowledgePoint, ComparisonResult);

/// A candidate filed against an existing knowledge point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMatch {
    pub new: KnowledgePoint,
    pub existing: KnowledgePoint,
    /// Position of `existing` in the scanned collection
    pub existing_index: usize,
    pub similarity: f64,
}

/// Four disjoint, order-preserving buckets covering every candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeduplicationResult {
    pub identical: Vec<DuplicateMatch>,
    pub different_methods: Vec<DuplicateMatch>,
    pub similar: Vec<DuplicateMatch>,
    pub new: Vec<KnowledgePoint>,
}

/// Bucket counts of a deduplication run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupSummary {
    pub new: usize,
    pub identical: usize,
    pub similar: usize,
    pub different_methods: usize,
}

impl DedupSummary {
    pub fn total(&self) -> usize {
        self.new + self.identical + self.similar + self.different_methods
    }
}

impl DeduplicationResult {
    pub fn summary(&self) -> DedupSummary {
        DedupSummary {
            new: self.new.len(),
            identical: self.identical.len(),
            similar: self.similar.len(),
            different_methods: self.different_methods.len(),
        }
    }

    /// Number of candidates classified
    pub fn len(&self) -> usize {
        self.summary().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matched entries for one relationship bucket
    pub fn matches(&self, relationship: Relationship) -> &[DuplicateMatch] {
        match relationship {
            Relationship::Identical => &self.identical,
            Relationship::DifferentMethods => &self.different_methods,
            Relationship::Similar => &self.similar,
            Relationship::Different => &[],
        }
    }

    fn file(&mut self, candidate: &KnowledgePoint, found: Option<Found<'_>>) {
        let Some((existing_index, existing, result)) = found else {
            self.new.push(candidate.clone());
            return;
        };

        let entry = DuplicateMatch {
            new: candidate.clone(),
            existing: existing.clone(),
            existing_index,
            similarity: result.score,
        };
        match result.relationship {
            Relationship::Identical => self.identical.push(entry),
            Relationship::DifferentMethods => self.different_methods.push(entry),
            Relationship::Similar => self.similar.push(entry),
            Relationship::Different => self.new.push(entry.new),
        }
    }
}

#[tracing::instrument(skip_all, fields(candidates = candidates.len(), existing = existing.len(), policy = %config.policy))]
pub(super) fn deduplicate(
    candidates: &[KnowledgePoint],
    existing: &[KnowledgePoint],
    config: &DedupConfig,
) -> DeduplicationResult {
    let mut result = DeduplicationResult::default();

    for candidate in candidates {
        let found = match config.policy {
            MatchPolicy::FirstMatch => first_match(candidate, existing, config),
            MatchPolicy::BestMatch => best_match(candidate, existing, config),
        };
        result.file(candidate, found);
    }

    let summary = result.summary();
    tracing::debug!(
        new = summary.new,
        identical = summary.identical,
        similar = summary.similar,
        different_methods = summary.different_methods,
        "deduplicated"
    );
    result
}

/// Scan in order and stop at the first non-`different` relationship
fn first_match<'a>(
    candidate: &KnowledgePoint,
    existing: &'a [KnowledgePoint],
    config: &DedupConfig,
) -> Option<Found<'a>> {
    existing.iter().enumerate().find_map(|(index, item)| {
        let result = comparison::compare(candidate, item, config);
        result
            .relationship
            .is_match()
            .then_some((index, item, result))
    })
}

/// Scan everything and keep the most specific, highest-scoring match
fn best_match<'a>(
    candidate: &KnowledgePoint,
    existing: &'a [KnowledgePoint],
    config: &DedupConfig,
) -> Option<Found<'a>> {
    let mut best: Option<Found<'a>> = None;

    for (index, item) in existing.iter().enumerate() {
        let result = comparison::compare(candidate, item, config);
        if !result.relationship.is_match() {
            continue;
        }

        // Strictly better only, so earlier items win ties
        let better = match &best {
            None => true,
            Some((_, _, current)) => {
                (result.relationship, result.score) > (current.relationship, current.score)
            }
        };
        if better {
            best = Some((index, item, result));
        }
        if result.relationship == Relationship::Identical {
            break;
        }
    }

    best
}
