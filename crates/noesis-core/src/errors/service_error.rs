/// Errors from the external model services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("embedding service error: {message}")]
    Embedding { message: String },

    #[error("llm service error: {message}")]
    Llm { message: String },
}
