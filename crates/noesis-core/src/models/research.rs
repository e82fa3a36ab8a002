use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entity::{Confidence, Content, ContentType};

/// The kind of source a researcher draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Web,
    Academic,
    Internal,
}

/// A query handed to a researcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchQuery {
    pub text: String,
    /// Modalities the caller wants findings in.
    pub modalities: Vec<ContentType>,
    /// Free-form context passed through to the researcher.
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    pub max_results: usize,
    pub min_confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl ResearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            modalities: vec![ContentType::Text],
            context: HashMap::new(),
            max_results: 10,
            min_confidence: 0.7,
            timestamp: Utc::now(),
        }
    }
}

/// An unvalidated candidate fact produced by a researcher.
/// Consumed by the validation engine, never stored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchFinding {
    pub content: Content,
    /// Human-readable source name ("arxiv", "knowledge_base", ...).
    pub source: String,
    pub source_kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// The researcher's own confidence in this finding.
    pub confidence: Confidence,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl ResearchFinding {
    /// The modality of this finding's content.
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }
}

/// Everything a researcher returned for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    pub query: ResearchQuery,
    pub findings: Vec<ResearchFinding>,
    pub total_findings: usize,
    pub processing_time_secs: f64,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}
