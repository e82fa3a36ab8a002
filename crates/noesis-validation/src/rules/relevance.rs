use noesis_core::errors::NoesisResult;
use noesis_core::models::ResearchFinding;

use super::{RuleContext, RuleOutcome, NEIGHBOR_LIMIT};

/// Relevance of the finding to the existing knowledge: mean cross-modal
/// similarity to its nearest stored neighbors. A store with nothing to
/// compare against yields a neutral 0.5.
pub async fn apply(
    finding: &ResearchFinding,
    ctx: &RuleContext<'_>,
) -> NoesisResult<RuleOutcome> {
    let vector = ctx.embedder.align(&finding.content).await?;
    let hits = ctx
        .vector
        .search_similar(&vector, NEIGHBOR_LIMIT, None)
        .await?;
    if hits.is_empty() {
        return Ok(RuleOutcome::with_feedback(
            0.5,
            "no similar content found for comparison",
        ));
    }
    let mut total = 0.0;
    for hit in &hits {
        total += ctx
            .embedder
            .compare(&finding.content, &hit.entity.content)
            .await?;
    }
    Ok(RuleOutcome::score(total / hits.len() as f64))
}
