//! Category catalog: definitions, content rules, loading and validation

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bail_catalog;
use crate::error::{KpointError, Result};

/// Current catalog format version
pub const CATALOG_FORMAT_VERSION: u32 = 1;

/// Catalog shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../../resources/categories.toml");

/// Numeric category identifier
pub type CategoryId = u32;

/// How a category's keywords are turned into match patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Keywords are literal text (escaped before compilation)
    #[default]
    Literal,
    /// Keywords are regular expressions
    Regex,
}

/// A topical category with three keyword tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub core_keywords: Vec<String>,
    #[serde(default)]
    pub related_keywords: Vec<String>,
    #[serde(default)]
    pub high_weight_keywords: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Carried for compatibility with existing catalogs; not applied to scores
    #[serde(default = "default_category_weight")]
    pub weight: f64,
}

/// Item metadata field a content rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleField {
    ContentType,
    Source,
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleField::ContentType => write!(f, "contentType"),
            RuleField::Source => write!(f, "source"),
        }
    }
}

/// Bonus points for categories when a metadata field mentions a needle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRule {
    pub field: RuleField,
    /// The rule fires when the field contains any of these (case-insensitive)
    pub contains: Vec<String>,
    pub categories: Vec<CategoryId>,
    pub points: f64,
}

impl ContentRule {
    /// Points this rule awards `category` for the given field value
    pub fn points_for(&self, category: CategoryId, value: &str) -> f64 {
        if !self.categories.contains(&category) {
            return 0.0;
        }
        let value = value.to_lowercase();
        let fired = self
            .contains
            .iter()
            .any(|needle| value.contains(&needle.to_lowercase()));
        if fired {
            self.points
        } else {
            0.0
        }
    }
}

/// Versioned set of category definitions and content rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCatalog {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
    #[serde(default)]
    pub content_rules: Vec<ContentRule>,
}

fn default_version() -> u32 {
    CATALOG_FORMAT_VERSION
}

fn default_category_weight() -> f64 {
    1.0
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        CategoryCatalog {
            version: CATALOG_FORMAT_VERSION,
            categories: Vec::new(),
            content_rules: Vec::new(),
        }
    }
}

impl CategoryCatalog {
    /// The eleven English-learning categories shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: CategoryCatalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let catalog: CategoryCatalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file; `.json` files are JSON, anything else is TOML
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| KpointError::io_operation("read catalog", path.display(), e))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(
            categories = catalog.categories.len(),
            rules = catalog.content_rules.len(),
            "catalog_loaded"
        );
        Ok(catalog)
    }

    /// Load from an optional path, falling back to the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Structural checks; keyword patterns are checked when compiled
    pub fn validate(&self) -> Result<()> {
        if self.version > CATALOG_FORMAT_VERSION {
            bail_catalog!(
                "unsupported catalog version {} (max {})",
                self.version,
                CATALOG_FORMAT_VERSION
            );
        }

        let mut ids = HashSet::new();
        for category in &self.categories {
            if !ids.insert(category.id) {
                bail_catalog!("duplicate category id {}", category.id);
            }
            if category.name.trim().is_empty() {
                bail_catalog!("category {} has an empty name", category.id);
            }
        }

        for (index, rule) in self.content_rules.iter().enumerate() {
            if rule.contains.is_empty() || rule.contains.iter().any(|n| n.is_empty()) {
                bail_catalog!("content rule {} on {} has an empty needle", index, rule.field);
            }
            if !rule.points.is_finite() {
                bail_catalog!("content rule {} has non-finite points", index);
            }
            if let Some(unknown) = rule.categories.iter().find(|id| !ids.contains(*id)) {
                bail_catalog!(
                    "content rule {} references unknown category {}",
                    index,
                    unknown
                );
            }
        }

        Ok(())
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = CategoryCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.content_rules.len(), 4);

        let grammar = catalog.get(1).unwrap();
        assert_eq!(grammar.name, "语法");
        assert_eq!(grammar.name_en, "Grammar");
        assert_eq!(grammar.match_mode, MatchMode::Literal);
        assert!(grammar.high_weight_keywords.contains(&"语法讲解".to_string()));
    }

    #[test]
    fn test_builtin_catalog_in_id_order() {
        let catalog = CategoryCatalog::builtin().unwrap();
        let ids: Vec<_> = catalog.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=11u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = CategoryCatalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
            [[categories]]
            id = 1
            name = "a"

            [[categories]]
            id = 1
            name = "b"
        "#;
        let err = CategoryCatalog::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("duplicate category id 1"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let toml = "[[categories]]\nid = 4\nname = \" \"\n";
        assert!(CategoryCatalog::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_rule_with_unknown_category_rejected() {
        let toml = r#"
            [[categories]]
            id = 1
            name = "a"

            [[contentRules]]
            field = "source"
            contains = ["youtube"]
            categories = [9]
            points = 3.0
        "#;
        let err = CategoryCatalog::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("unknown category 9"));
    }

    #[test]
    fn test_newer_version_rejected() {
        assert!(CategoryCatalog::from_toml_str("version = 2\n").is_err());
    }

    #[test]
    fn test_load_json_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"categories": [{"id": 7, "name": "数学", "nameEn": "Math", "coreKeywords": ["math"]}]}"#,
        )
        .unwrap();

        let catalog = CategoryCatalog::load(&path).unwrap();
        assert_eq!(catalog.get(7).unwrap().name_en, "Math");
        assert_eq!(catalog.get(7).unwrap().weight, 1.0);
    }

    #[test]
    fn test_load_toml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        let builtin = CategoryCatalog::builtin().unwrap();
        fs::write(&path, toml::to_string_pretty(&builtin).unwrap()).unwrap();

        assert_eq!(CategoryCatalog::load(&path).unwrap(), builtin);
    }

    #[test]
    fn test_load_or_builtin_without_path() {
        let catalog = CategoryCatalog::load_or_builtin(None).unwrap();
        assert_eq!(catalog.len(), 11);
    }

    #[test]
    fn test_content_rule_points_for() {
        let rule = ContentRule {
            field: RuleField::ContentType,
            contains: vec!["article".into(), "post".into()],
            categories: vec![4, 5],
            points: 5.0,
        };
        assert_eq!(rule.points_for(4, "Blog POST"), 5.0);
        assert_eq!(rule.points_for(5, "news-article"), 5.0);
        assert_eq!(rule.points_for(3, "article"), 0.0);
        assert_eq!(rule.points_for(4, "video"), 0.0);
    }
}
