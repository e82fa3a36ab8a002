use async_trait::async_trait;

use crate::errors::NoesisResult;

/// The external language model, used only for hypothesis/insight text.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn generate(&self, prompt: &str) -> NoesisResult<String>;
}
