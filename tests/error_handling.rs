//! Failure-path behavior of the pipeline: precondition violations stay
//! distinguishable from provider failures, and neither leaves partial state
//! behind.

use std::sync::Arc;

use memcore::{
    ClassificationService, ClassifyConfig, Decision, EmbeddingConfig, EmbeddingError,
    EmbeddingService, HeuristicRelationshipProvider, HttpRelationshipProvider, InMemoryStore,
    MemoryStore, RelationshipClassification, ResolveError, ResolveRequest, Resolver, ResolverConfig,
};

// Nothing listens here; connections are refused immediately, which is the
// cheapest reproducible provider failure.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/v1";

#[tokio::test]
async fn blank_content_is_invalid_input_not_a_provider_failure() {
    let (resolver, store) = memcore::in_memory_pipeline(ResolverConfig::default()).unwrap();

    for content in ["", "   ", "\n\t"] {
        let err = resolver
            .resolve_and_commit(&ResolveRequest::new(content))
            .await
            .unwrap_err();
        assert!(
            matches!(
                err,
                ResolveError::Embedding(EmbeddingError::InvalidInput(_))
            ),
            "{content:?} should be rejected as invalid input, got: {err}"
        );
    }
    assert_eq!(store.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn embedding_generate_rejects_blank_text_without_contacting_endpoint() {
    // The endpoint is dead; if the service tried to call it, the error would
    // be a provider failure, not invalid input.
    let service = EmbeddingService::from_config(EmbeddingConfig {
        api_url: Some(DEAD_ENDPOINT.into()),
        ..Default::default()
    })
    .unwrap();

    let err = service.generate("   ").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidInput(_)));
}

#[tokio::test]
async fn unreachable_embedding_provider_surfaces_as_provider_failure() {
    let store = Arc::new(InMemoryStore::new());
    let resolver = Resolver::new(
        EmbeddingService::from_config(EmbeddingConfig {
            api_url: Some(DEAD_ENDPOINT.into()),
            api_timeout_secs: 2,
            ..Default::default()
        })
        .unwrap(),
        ClassificationService::new(Arc::new(HeuristicRelationshipProvider)),
        store.clone(),
        ResolverConfig::default(),
    )
    .unwrap();

    let err = resolver
        .resolve_and_commit(&ResolveRequest::new("a perfectly valid fact"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::Embedding(EmbeddingError::Provider(_))
    ));
    assert_eq!(store.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn degenerate_classification_input_short_circuits_before_the_wire() {
    // Same dead endpoint: the empty-input fallback must answer without a
    // provider round-trip, so no failure can occur.
    let service = ClassificationService::new(Arc::new(
        HttpRelationshipProvider::new(ClassifyConfig {
            api_url: Some(DEAD_ENDPOINT.into()),
            ..Default::default()
        })
        .unwrap(),
    ));

    let label = service.classify("", "anything", None).await.unwrap();
    assert_eq!(label, RelationshipClassification::Similar);

    let label = service.classify("anything", "", None).await.unwrap();
    assert_eq!(label, RelationshipClassification::Similar);
}

#[tokio::test]
async fn unreachable_classification_provider_aborts_the_run() {
    let store = Arc::new(InMemoryStore::new());
    let resolver = Resolver::new(
        EmbeddingService::new(Arc::new(memcore::StubEmbeddingProvider::default())),
        ClassificationService::new(Arc::new(
            HttpRelationshipProvider::new(ClassifyConfig {
                api_url: Some(DEAD_ENDPOINT.into()),
                api_timeout_secs: 2,
                ..Default::default()
            })
            .unwrap(),
        )),
        store.clone(),
        ResolverConfig::default(),
    )
    .unwrap();

    // Seed one record so the run actually reaches classification.
    let seeded = resolver
        .resolve_and_commit(&ResolveRequest::new("the first fact"))
        .await
        .unwrap();
    assert_eq!(seeded.decision, Decision::Insert);

    let err = resolver
        .resolve_and_commit(&ResolveRequest::new("the second fact"))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Classify(_)));

    // The failed run committed nothing.
    assert_eq!(store.count(None).await.unwrap(), 1);
}
