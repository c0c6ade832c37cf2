//! Text normalization and edit-distance similarity
//!
//! Lengths and edit operations are measured in Unicode scalar values, so
//! mixed Chinese/English problem statements compare character by character.

/// Question marks stripped from problem statements (ASCII and full-width)
const QUESTION_MARKS: [char; 2] = ['?', '？'];

/// Lower-case, collapse whitespace runs to one space and trim
pub fn normalize_method(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// Method normalization plus removal of `?` and `？`
///
/// Question marks are removed before whitespace is collapsed so that
/// `"a ? b"` becomes `"a b"` in a single pass.
pub fn normalize_problem(text: &str) -> String {
    let lowered = text.to_lowercase().replace(QUESTION_MARKS, "");
    collapse_whitespace(&lowered)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Levenshtein distance between two strings, counted in characters
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity ratio in `[0, 1]` between two problem statements
///
/// Both inputs are normalized as problems first. Two empty strings score
/// 1.0; otherwise the score is `(max_len - distance) / max_len`.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let a = normalize_problem(s1);
    let b = normalize_problem(s2);
    strsim::normalized_levenshtein(&a, &b)
}
