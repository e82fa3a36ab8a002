pub mod embedding;
pub mod graph_index;
pub mod llm;
pub mod researcher;
pub mod vector_index;

pub use embedding::EmbeddingService;
pub use graph_index::GraphIndex;
pub use llm::LlmService;
pub use researcher::Researcher;
pub use vector_index::VectorIndex;
