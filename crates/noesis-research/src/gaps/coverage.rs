use tracing::warn;

use noesis_core::entity::Content;
use noesis_core::models::{DetectionMethod, KnowledgeGap};
use noesis_core::traits::EmbeddingService;
use noesis_store::HybridStore;

/// Probe each tracked topic against the similarity index. Topics with
/// too few hits, or only low-confidence hits, are coverage gaps.
/// Service/index errors skip the topic — never the whole detection pass.
pub async fn detect(
    store: &HybridStore,
    embedder: &dyn EmbeddingService,
    tracked_topics: &[String],
    min_results: usize,
    min_confidence: f64,
) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();
    for topic in tracked_topics {
        let vector = match embedder.align(&Content::Text(topic.clone())).await {
            Ok(v) => v,
            Err(e) => {
                warn!(topic = %topic, error = %e, "coverage probe embedding failed");
                continue;
            }
        };
        let hits = match store.vector().search_similar(&vector, min_results, None).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(topic = %topic, error = %e, "coverage probe search failed");
                continue;
            }
        };

        if hits.len() < min_results {
            let deficit = (min_results - hits.len()) as f64 / min_results as f64;
            gaps.push(KnowledgeGap::new(
                topic.clone(),
                format!(
                    "only {}/{} entities cover this tracked topic",
                    hits.len(),
                    min_results
                ),
                0.5 + 0.5 * deficit,
                DetectionMethod::Coverage,
                0.8,
            ));
            continue;
        }

        let mean_confidence = hits
            .iter()
            .map(|h| h.entity.confidence.value())
            .sum::<f64>()
            / hits.len() as f64;
        if mean_confidence < min_confidence {
            gaps.push(KnowledgeGap::new(
                topic.clone(),
                format!("coverage exists but mean confidence is {mean_confidence:.2}"),
                0.5,
                DetectionMethod::Coverage,
                0.6,
            ));
        }
    }
    gaps
}
