/// Noesis system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name under which the default embedding model's vectors are stored
/// in `KnowledgeEntity::embeddings`.
pub const DEFAULT_EMBEDDING_MODEL: &str = "default";

/// Base relevance score for graph-discovered (non-direct) search results.
pub const RELATED_BASE_SCORE: f64 = 0.7;
