//! Embedding generation for memory content.
//!
//! The external embedding provider is modeled as a narrow capability
//! interface ([`EmbeddingProvider`]) injected into [`EmbeddingService`].
//! The service validates input, delegates, and returns the provider's
//! vector verbatim: no dimensionality checking, no caching, no retries.
//! Those omissions are a deliberate simplicity boundary; anything smarter
//! belongs to the caller.
//!
//! ```no_run
//! use std::sync::Arc;
//! use embedding::{EmbeddingService, StubEmbeddingProvider};
//!
//! # #[tokio::main] async fn main() {
//! let service = EmbeddingService::new(Arc::new(StubEmbeddingProvider::default()));
//! let embedding = service.generate("the cat sits on the mat").await.unwrap();
//! assert_eq!(embedding.dim, embedding.vector.len());
//! # }
//! ```

mod config;
mod error;
mod normalize;
mod provider;
mod stub;
mod types;

pub use crate::config::EmbeddingConfig;
pub use crate::error::EmbeddingError;
pub use crate::normalize::{cosine_similarity, l2_normalize_in_place};
pub use crate::provider::{EmbeddingProvider, HttpEmbeddingProvider};
pub use crate::stub::StubEmbeddingProvider;
pub use crate::types::Embedding;

use std::sync::Arc;

/// Validating front door to the injected embedding provider.
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Service backed by the HTTP adapter described by `cfg`.
    pub fn from_config(cfg: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        Ok(Self::new(Arc::new(HttpEmbeddingProvider::new(cfg)?)))
    }

    /// Embed `text`.
    ///
    /// Text that is empty after trimming fails with
    /// [`EmbeddingError::InvalidInput`] before the provider is contacted.
    /// Provider failures propagate unchanged.
    pub async fn generate(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "text must not be empty after trimming".into(),
            ));
        }

        let vector = self.provider.embed(text).await?;
        Ok(Embedding::new(vector, self.provider.model_name()))
    }
}
