//! Utilities for records output format
//!
//! Every records stream opens with an `H` header line. Body lines start
//! with a one-letter tag:
//! - `M` a candidate filed against an existing knowledge point
//! - `N` a candidate with no match
//! - `C` a scored category
//! - `X` a comparison outcome

use crate::category::{CategoryScore, Recommendation};
use crate::knowledge::KnowledgePoint;
use crate::similarity::{ComparisonResult, DuplicateMatch, Relationship};

/// Records format version written in every header
pub const RECORDS_VERSION: u32 = 1;

/// Escape double quotes in a string for records format.
/// Replaces `"` with `\"` to allow safe embedding in quoted fields.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Quote a free-text field, folding newlines so each record stays on one line
fn quoted(s: &str) -> String {
    let single_line = s.replace(['\r', '\n'], " ");
    format!("\"{}\"", escape_quotes(&single_line))
}

/// Format the header line for a records stream
pub fn format_header(mode: &str, fields: &[(&str, String)]) -> String {
    let mut line = format!("H kpoint=1 records={} mode={}", RECORDS_VERSION, mode);
    for (key, value) in fields {
        line.push_str(&format!(" {}={}", key, value));
    }
    line
}

/// Format a pairwise comparison outcome
pub fn format_comparison(result: &ComparisonResult) -> String {
    format!("X {} score={:.4}", result.relationship, result.score)
}

/// Format a candidate filed against an existing knowledge point
pub fn format_match(relationship: Relationship, m: &DuplicateMatch) -> String {
    format!(
        "M {} existing={} score={:.4} {}",
        relationship,
        m.existing_index,
        m.similarity,
        quoted(m.new.problem_text())
    )
}

/// Format a candidate that matched nothing
pub fn format_new(point: &KnowledgePoint) -> String {
    let methods = point.method_texts().len();
    format!("N methods={} {}", methods, quoted(point.problem_text()))
}

/// Format a recommended category
pub fn format_recommendation(rank: usize, r: &Recommendation) -> String {
    format!(
        "C {} rank={} score={:.1} confidence={} {} {}",
        r.category_id,
        rank,
        r.score,
        r.confidence,
        quoted(&r.category_name),
        quoted(&r.category_name_en)
    )
}

/// Format an audit line for a category that was not recommended
pub fn format_audit(score: &CategoryScore) -> String {
    let mut line = format!(
        "C {} rank=- score={:.1} confidence={}",
        score.category_id, score.score, score.confidence
    );
    if let Some(error) = &score.error {
        line.push_str(&format!(" error={}", quoted(error)));
    }
    line
}
