//! Kpoint Core Library
//!
//! Classification core for knowledge points extracted from learning
//! content: fuzzy deduplication against an existing knowledge base and
//! weighted keyword recommendation of topical categories.

pub mod category;
pub mod config;
pub mod error;
pub mod format;
pub mod knowledge;
pub mod logging;
pub mod records;
pub mod similarity;
pub mod text;

pub use category::{CategoryRecommender, RecommendationResult};
pub use config::EngineConfig;
pub use error::{KpointError, Result};
pub use knowledge::KnowledgePoint;
pub use similarity::{DeduplicationResult, Relationship, SimilarityEngine};
