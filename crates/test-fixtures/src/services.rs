//! Deterministic embedding/LLM stubs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use noesis_core::entity::Content;
use noesis_core::errors::{NoesisResult, ServiceError};
use noesis_core::traits::{EmbeddingService, LlmService};

/// Deterministic pseudo-embedding: blake3 XOF over the serialized content,
/// mapped to `dims` values in [0, 1]. Same content always embeds the same.
pub fn stub_vector(content: &Content, dims: usize) -> Vec<f32> {
    let key = match content {
        Content::Text(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    };
    let mut hasher = blake3::Hasher::new();
    hasher.update(key.as_bytes());
    let mut reader = hasher.finalize_xof();
    let mut bytes = vec![0u8; dims];
    reader.fill(&mut bytes);
    bytes.iter().map(|b| f32::from(*b) / 255.0).collect()
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let na: f64 = a.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na * nb)).clamp(0.0, 1.0)
}

/// Embedding service double.
///
/// Counts `align` calls (for cache-behavior assertions), optionally delays
/// each call (for timeout tests), and optionally pins `compare` to a fixed
/// similarity (for synthesis threshold tests).
pub struct StubEmbeddingService {
    dims: usize,
    align_calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
    fixed_compare: Mutex<Option<f64>>,
    fail: Mutex<bool>,
}

impl StubEmbeddingService {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            align_calls: AtomicUsize::new(0),
            delay: Mutex::new(None),
            fixed_compare: Mutex::new(None),
            fail: Mutex::new(false),
        }
    }

    /// Number of `align` calls so far.
    pub fn align_calls(&self) -> usize {
        self.align_calls.load(Ordering::SeqCst)
    }

    /// Delay every call by `d` (drives rule-timeout tests).
    pub fn set_delay(&self, d: Duration) {
        *self.delay.lock().unwrap() = Some(d);
    }

    /// Pin `compare` to a fixed similarity.
    pub fn set_fixed_compare(&self, similarity: f64) {
        *self.fixed_compare.lock().unwrap() = Some(similarity);
    }

    /// Make every call fail (drives embedding-failure tests).
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }

    async fn maybe_delay(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }

    fn check_failure(&self) -> NoesisResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(ServiceError::Embedding {
                message: "injected failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingService for StubEmbeddingService {
    async fn align(&self, content: &Content) -> NoesisResult<Vec<f32>> {
        self.align_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        self.check_failure()?;
        Ok(stub_vector(content, self.dims))
    }

    async fn compare(&self, a: &Content, b: &Content) -> NoesisResult<f64> {
        self.maybe_delay().await;
        self.check_failure()?;
        if let Some(fixed) = *self.fixed_compare.lock().unwrap() {
            return Ok(fixed);
        }
        Ok(cosine(
            &stub_vector(a, self.dims),
            &stub_vector(b, self.dims),
        ))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

/// LLM double returning a canned response.
pub struct StubLlm {
    response: String,
}

impl StubLlm {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LlmService for StubLlm {
    async fn generate(&self, _prompt: &str) -> NoesisResult<String> {
        Ok(self.response.clone())
    }
}
