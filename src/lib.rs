//! Umbrella crate for the memcore memory resolution pipeline.
//!
//! Stitches the member crates together so callers get the whole flow (API
//! key identity, project partitioning, embedding, relationship
//! classification, and the resolution policy) from a single dependency.
//!
//! The typical integration wires real HTTP providers via
//! [`EmbeddingService::from_config`] and [`ClassificationService::from_config`]
//! and a persistent [`MemoryStore`] backend. [`in_memory_pipeline`] wires the
//! deterministic in-process providers and the bundled store instead, which is
//! what the examples, tests, and offline development use.

pub use classify::{
    ClassificationService, ClassifyConfig, ClassifyError, HeuristicRelationshipProvider,
    HttpRelationshipProvider, RelationshipClassification, RelationshipProvider, CLASSIFY_STAGE,
};
pub use embedding::{
    cosine_similarity, Embedding, EmbeddingConfig, EmbeddingError, EmbeddingProvider,
    EmbeddingService, HttpEmbeddingProvider, StubEmbeddingProvider,
};
pub use identity::{
    extract_key_prefix, generate_api_key, hash_api_key, IssuedApiKey, API_KEY_PREFIX_LEN,
    API_KEY_TAG,
};
pub use namespace::{normalize_project_name, same_partition};
pub use resolver::{
    Decision, Resolution, ResolveError, ResolveRequest, Resolver, ResolverConfig, EMBED_STAGE,
    SEARCH_STAGE,
};
pub use store::{CandidateMemory, InMemoryStore, MemoryRecord, MemoryStore, StoreError};
pub use timing::{TimingContext, TimingSummary};

use std::sync::Arc;

/// Build a fully in-process pipeline: stub embeddings, heuristic
/// classification, and the bundled in-memory store.
///
/// Returns the store handle alongside the resolver so callers (mostly
/// tests and demos) can inspect what the decisions did to storage.
pub fn in_memory_pipeline(
    cfg: ResolverConfig,
) -> Result<(Resolver, Arc<InMemoryStore>), ResolveError> {
    let store = Arc::new(InMemoryStore::new());
    let resolver = Resolver::new(
        EmbeddingService::new(Arc::new(StubEmbeddingProvider::default())),
        ClassificationService::new(Arc::new(HeuristicRelationshipProvider)),
        store.clone(),
        cfg,
    )?;
    Ok((resolver, store))
}
