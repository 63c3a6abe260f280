use async_trait::async_trait;
use fxhash::hash64;

use crate::normalize::l2_normalize_in_place;
use crate::provider::EmbeddingProvider;
use crate::EmbeddingError;

/// Deterministic in-process provider for tests and offline development.
///
/// Generates sinusoid values seeded by a hash of the input text, so equal
/// texts always embed identically and distinct texts almost never collide.
/// Vectors are unit-normalized so cosine ranking behaves like the real thing.
pub struct StubEmbeddingProvider {
    dim: usize,
}

impl StubEmbeddingProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for StubEmbeddingProvider {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    fn model_name(&self) -> &str {
        "stub-embedding"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut v = vec![0f32; self.dim];
        let h = hash64(text.as_bytes());
        for (idx, value) in v.iter_mut().enumerate() {
            *value = ((h >> (idx % 32)) as f32 * 0.0001).sin();
        }
        l2_normalize_in_place(&mut v);
        Ok(v)
    }
}
