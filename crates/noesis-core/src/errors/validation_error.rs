use crate::entity::ContentType;

/// Errors from the validation engine. Rule timeouts are NOT errors —
/// they are recovered locally as a 0.0 score plus feedback.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The battery has no rule applicable to this content type.
    /// Fatal to the single call, not to the process.
    #[error("no validation rules applicable to content type {content_type:?}")]
    UnsupportedContentType { content_type: ContentType },

    #[error("validation battery is empty")]
    EmptyBattery,
}
