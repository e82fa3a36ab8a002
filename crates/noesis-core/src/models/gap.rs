use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::ContentType;

/// How a knowledge gap was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    QueryPatterns,
    Coverage,
    Consistency,
    TemporalStaleness,
}

/// A detected deficiency in stored knowledge.
///
/// Created by gap detectors, consumed exactly once by the research
/// dispatcher, and discarded after research completes — gaps are never
/// persisted as entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeGap {
    /// Deduplication key: at most one research task per topic is in flight.
    pub topic: String,
    pub description: String,
    /// 0.0–1.0, set by the detector.
    pub importance: f64,
    /// Modalities the research should target.
    pub modalities: Vec<ContentType>,
    /// Entity ids the gap was derived from, if any.
    pub related_entities: Vec<String>,
    pub detection_method: DetectionMethod,
    pub detection_confidence: f64,
    pub detected_at: DateTime<Utc>,
}

impl KnowledgeGap {
    pub fn new(
        topic: impl Into<String>,
        description: impl Into<String>,
        importance: f64,
        method: DetectionMethod,
        detection_confidence: f64,
    ) -> Self {
        Self {
            topic: topic.into(),
            description: description.into(),
            importance: importance.clamp(0.0, 1.0),
            modalities: vec![ContentType::Text],
            related_entities: Vec::new(),
            detection_method: method,
            detection_confidence: detection_confidence.clamp(0.0, 1.0),
            detected_at: Utc::now(),
        }
    }
}
