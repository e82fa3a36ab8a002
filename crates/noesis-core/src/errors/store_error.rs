/// Errors from the hybrid store and its underlying indexes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("vector index error: {message}")]
    VectorIndex { message: String },

    #[error("graph index error: {message}")]
    GraphIndex { message: String },

    /// A dual write failed halfway; the partial write was rolled back.
    #[error("dual-write inconsistency for entity {entity_id}: {reason}")]
    Inconsistency { entity_id: String, reason: String },

    #[error("entity {id} violates an invariant: {reason}")]
    InvalidEntity { id: String, reason: String },
}
