use noesis_core::entity::ContentType;
use noesis_core::errors::NoesisResult;
use noesis_core::models::{ResearchFinding, SearchFilter};

use super::{RuleContext, RuleOutcome, NEIGHBOR_LIMIT};

/// Agreement with the nearest existing entities of any modality. High
/// similarity to what is already known reads as consistent. An empty
/// neighborhood scores a cautious 0.8 — nothing to contradict.
pub async fn internal(
    finding: &ResearchFinding,
    ctx: &RuleContext<'_>,
) -> NoesisResult<RuleOutcome> {
    let vector = ctx.embedder.align(&finding.content).await?;
    let hits = ctx
        .vector
        .search_similar(&vector, NEIGHBOR_LIMIT, None)
        .await?;
    if hits.is_empty() {
        return Ok(RuleOutcome::score(0.8));
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

/// Agreement of non-text content with nearby text knowledge. Text needs
/// no cross-modal check; non-text content with no comparable text in the
/// store is exempt (scores 1.0).
pub async fn cross_modal(
    finding: &ResearchFinding,
    ctx: &RuleContext<'_>,
) -> NoesisResult<RuleOutcome> {
    if finding.content_type() == ContentType::Text {
        return Ok(RuleOutcome::score(1.0));
    }
    let vector = ctx.embedder.align(&finding.content).await?;
    let filter = SearchFilter {
        content_types: vec![ContentType::Text],
        ..Default::default()
    };
    let hits = ctx
        .vector
        .search_similar(&vector, NEIGHBOR_LIMIT, Some(&filter))
        .await?;
    if hits.is_empty() {
        return Ok(RuleOutcome::with_feedback(
            1.0,
            "no text knowledge to compare against; exempt",
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
