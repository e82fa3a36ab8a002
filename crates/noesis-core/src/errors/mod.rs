pub mod research_error;
pub mod search_error;
pub mod service_error;
pub mod store_error;
pub mod validation_error;

pub use research_error::ResearchError;
pub use search_error::SearchError;
pub use service_error::ServiceError;
pub use store_error::StoreError;
pub use validation_error::ValidationError;

/// Result alias used across the workspace.
pub type NoesisResult<T> = Result<T, NoesisError>;

/// Top-level error for the Noesis knowledge system.
#[derive(Debug, thiserror::Error)]
pub enum NoesisError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("research error: {0}")]
    Research(#[from] ResearchError),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
