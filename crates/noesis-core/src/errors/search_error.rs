/// Errors from the search engine.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A text query could not be embedded. Aborts the query — there is
    /// no vector to search with.
    #[error("query embedding failed: {message}")]
    Embedding { message: String },

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}
