use async_trait::async_trait;

use crate::entity::Content;
use crate::errors::NoesisResult;

/// The external multi-modal embedding/alignment model.
///
/// Maps any supported content into one shared vector space of a fixed,
/// configuration-agreed dimension, and compares two pieces of content
/// across modalities.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embed content into the shared space. The content carries its own
    /// modality tag.
    async fn align(&self, content: &Content) -> NoesisResult<Vec<f32>>;

    /// Cross-modal similarity in [0.0, 1.0].
    async fn compare(&self, a: &Content, b: &Content) -> NoesisResult<f64>;

    /// The fixed vector dimension this service produces.
    fn dimensions(&self) -> usize;
}
