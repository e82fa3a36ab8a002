use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use noesis_core::entity::{ContentType, KnowledgeEntity, Relation};
use noesis_core::models::SearchFilter;

/// A composite search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Free-text leg; embedded and run against the similarity index.
    pub text: Option<String>,
    /// Keep only these content types (empty = all).
    pub content_types: Vec<ContentType>,
    /// Tag filter; ALL vs ANY semantics via `require_all_tags`.
    pub tags: Vec<String>,
    pub require_all_tags: bool,
    pub exclude_tags: Vec<String>,
    /// Confidence floor.
    pub min_confidence: f64,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Graph leg: seed entity for traversal.
    pub related_to: Option<String>,
    /// Traversal depth for the graph leg; engine default when absent.
    pub relation_depth: Option<usize>,
    /// Result limit; engine default when absent, always capped.
    pub limit: Option<usize>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            content_types: Vec::new(),
            tags: Vec::new(),
            require_all_tags: false,
            exclude_tags: Vec::new(),
            min_confidence: 0.5,
            date_range: None,
            related_to: None,
            relation_depth: None,
            limit: None,
        }
    }
}

impl SearchQuery {
    /// A plain text query with default filters.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Translate the query into the index-native filter, applied
    /// identically to vector candidates and graph-discovered entities.
    pub fn to_filter(&self) -> SearchFilter {
        let (tags_all, tags_any) = if self.require_all_tags {
            (self.tags.clone(), Vec::new())
        } else {
            (Vec::new(), self.tags.clone())
        };
        SearchFilter {
            content_types: self.content_types.clone(),
            min_confidence: (self.min_confidence > 0.0).then_some(self.min_confidence),
            tags_all,
            tags_any,
            exclude_tags: self.exclude_tags.clone(),
            created_after: self.date_range.map(|(start, _)| start),
            created_before: self.date_range.map(|(_, end)| end),
        }
    }

    /// Canonical form for cache keying: trimmed/lowercased text, sorted
    /// tag lists. Queries differing only in those details share a key.
    pub(crate) fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.text = normalized
            .text
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        normalized.tags.sort();
        normalized.exclude_tags.sort();
        normalized
    }
}

/// Query execution telemetry attached to every result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total_results: usize,
    pub direct_count: usize,
    pub related_count: usize,
    pub paths_found: usize,
    /// The graph leg failed and the result is vector-only.
    pub degraded: bool,
    /// Served from the result cache.
    pub cache_hit: bool,
    pub executed_at: DateTime<Utc>,
}

/// Ranked, cached search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Similarity matches, best first.
    pub direct_matches: Vec<KnowledgeEntity>,
    /// Graph-discovered entities that passed the filter.
    pub related_entities: Vec<KnowledgeEntity>,
    /// Paths from the traversal seed to related entities.
    pub graph_paths: Vec<Vec<Relation>>,
    /// Relevance score per entity id.
    pub scores: HashMap<String, f64>,
    pub metadata: SearchMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_uses_all_semantics_when_required() {
        let mut query = SearchQuery::text("q");
        query.tags = vec!["a".into(), "b".into()];
        query.require_all_tags = true;
        let filter = query.to_filter();
        assert_eq!(filter.tags_all.len(), 2);
        assert!(filter.tags_any.is_empty());
    }

    #[test]
    fn normalization_ignores_case_and_tag_order() {
        let mut a = SearchQuery::text("  Rust Async  ");
        a.tags = vec!["b".into(), "a".into()];
        let mut b = SearchQuery::text("rust async");
        b.tags = vec!["a".into(), "b".into()];
        let (a, b) = (a.normalized(), b.normalized());
        assert_eq!(a.text, b.text);
        assert_eq!(a.tags, b.tags);
    }

    #[test]
    fn zero_confidence_floor_is_unconstrained() {
        let mut query = SearchQuery::text("q");
        query.min_confidence = 0.0;
        assert!(query.to_filter().min_confidence.is_none());
    }
}
