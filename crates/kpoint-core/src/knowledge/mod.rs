//! Knowledge point records
//!
//! Records are supplied by the caller (extraction pipeline or persistence
//! layer) and are never owned or cached by the engines.

mod merge;

pub use merge::{merge_different_methods, merge_identical};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Provenance of a knowledge point (opaque to comparison)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Source {
    /// Kind of origin, e.g. "link" or "document"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// A single problem/solution record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KnowledgePoint {
    /// The question or topic the item addresses
    #[serde(default, deserialize_with = "null_as_default")]
    pub problem: String,
    /// Solutions or approaches, compared as an unordered multiset
    #[serde(default, deserialize_with = "null_as_default")]
    pub methods: Vec<String>,
    /// Display labels
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sources: Vec<Source>,
    /// Extraction output sometimes carries a title instead of a problem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Extraction output sometimes carries one content blob instead of methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl KnowledgePoint {
    /// Create a knowledge point from a problem and its methods
    pub fn new(
        problem: impl Into<String>,
        methods: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        KnowledgePoint {
            problem: problem.into(),
            methods: methods.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Add tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add a source
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Problem text used for comparison, falling back to the title
    pub fn problem_text(&self) -> &str {
        if !self.problem.is_empty() {
            return &self.problem;
        }
        self.title.as_deref().unwrap_or("")
    }

    /// Method texts used for comparison, falling back to the content blob
    pub fn method_texts(&self) -> Vec<&str> {
        if !self.methods.is_empty() {
            return self.methods.iter().map(String::as_str).collect();
        }
        match self.content.as_deref() {
            Some(content) => vec![content],
            None => Vec::new(),
        }
    }
}
