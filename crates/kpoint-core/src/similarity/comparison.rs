use crate::config::DedupConfig;
use crate::knowledge::KnowledgePoint;
use crate::similarity::{ComparisonResult, Relationship};
use crate::text::{normalize_method, normalize_problem, similarity};

/// Classify two knowledge points; the first matching rule wins
pub(super) fn compare(
    a: &KnowledgePoint,
    b: &KnowledgePoint,
    config: &DedupConfig,
) -> ComparisonResult {
    let problem_a = normalize_problem(a.problem_text());
    let problem_b = normalize_problem(b.problem_text());

    if problem_a == problem_b {
        if methods_identical(&a.method_texts(), &b.method_texts()) {
            return ComparisonResult {
                relationship: Relationship::Identical,
                score: 1.0,
            };
        }
        return ComparisonResult {
            relationship: Relationship::DifferentMethods,
            score: config.different_methods_score,
        };
    }

    let score = similarity(&problem_a, &problem_b);
    if score > config.similar_threshold {
        return ComparisonResult {
            relationship: Relationship::Similar,
            score,
        };
    }

    ComparisonResult::DIFFERENT
}

/// Method lists are equal as multisets of normalized strings
fn methods_identical(a: &[&str], b: &[&str]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut a: Vec<String> = a.iter().map(|m| normalize_method(m)).collect();
    let mut b: Vec<String> = b.iter().map(|m| normalize_method(m)).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
