use std::collections::HashSet;

use super::KnowledgePoint;

/// Fold an identical candidate into the existing record
///
/// Keeps the existing problem and methods; appends the candidate's sources
/// and unions the tags, existing tags first.
pub fn merge_identical(new: &KnowledgePoint, existing: &KnowledgePoint) -> KnowledgePoint {
    let mut merged = existing.clone();
    merged.sources.extend(new.sources.iter().cloned());
    merged.tags = union_tags(&existing.tags, &new.tags);
    merged
}

/// Fold a same-problem candidate's methods into the existing record
///
/// Methods and sources are concatenated, existing first. Tags are left as
/// the existing record has them.
pub fn merge_different_methods(new: &KnowledgePoint, existing: &KnowledgePoint) -> KnowledgePoint {
    let mut merged = existing.clone();
    merged.methods.extend(new.methods.iter().cloned());
    merged.sources.extend(new.sources.iter().cloned());
    merged
}

fn union_tags(existing: &[String], newer: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Vec::with_capacity(existing.len() + newer.len());
    for tag in existing.iter().chain(newer.iter()) {
        if seen.insert(tag.as_str()) {
            result.push(tag.clone());
        }
    }
    result
}
