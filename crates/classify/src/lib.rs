//! Relationship classification between a new memory and an existing one.
//!
//! The external provider is a narrow capability interface
//! ([`RelationshipProvider`]) injected into [`ClassificationService`]. The
//! service owns two policies and nothing else: degenerate (empty) input
//! short-circuits to the conservative [`RelationshipClassification::Similar`]
//! without a provider round-trip, and a supplied [`TimingContext`] gets the
//! provider call recorded under [`CLASSIFY_STAGE`]. Everything smarter
//! (retries, fallbacks, aggregation) is explicitly not this layer's job.

mod error;
mod heuristic;
mod provider;
mod types;

pub use crate::error::ClassifyError;
pub use crate::heuristic::HeuristicRelationshipProvider;
pub use crate::provider::{ClassifyConfig, HttpRelationshipProvider, RelationshipProvider};
pub use crate::types::{RelationshipClassification, UnknownLabel};

use std::sync::Arc;

use timing::TimingContext;

/// Stage name the provider call is recorded under when timing is requested.
pub const CLASSIFY_STAGE: &str = "classify_relationship";

/// Front door to the injected relationship provider.
#[derive(Clone)]
pub struct ClassificationService {
    provider: Arc<dyn RelationshipProvider>,
}

impl ClassificationService {
    pub fn new(provider: Arc<dyn RelationshipProvider>) -> Self {
        Self { provider }
    }

    /// Service backed by the HTTP adapter described by `cfg`.
    pub fn from_config(cfg: ClassifyConfig) -> Result<Self, ClassifyError> {
        Ok(Self::new(Arc::new(HttpRelationshipProvider::new(cfg)?)))
    }

    /// Classify how `new` relates to `existing`.
    ///
    /// If either side is empty after trimming, the provider is not invoked
    /// and the answer is `Similar`: missing data means "nothing new to add",
    /// not an error. With a timing context, the provider call is measured
    /// and recorded whether it succeeds or fails; without one, the call runs
    /// unwrapped. Provider failures propagate unchanged.
    pub async fn classify(
        &self,
        existing: &str,
        new: &str,
        timing: Option<&mut TimingContext>,
    ) -> Result<RelationshipClassification, ClassifyError> {
        if existing.trim().is_empty() || new.trim().is_empty() {
            tracing::debug!(
                existing_len = existing.len(),
                new_len = new.len(),
                "degenerate classification input, short-circuiting to `similar`"
            );
            return Ok(RelationshipClassification::Similar);
        }

        match timing {
            Some(ctx) => ctx.time(CLASSIFY_STAGE, self.provider.classify(existing, new)).await,
            None => self.provider.classify(existing, new).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        result: Result<RelationshipClassification, ClassifyError>,
    }

    impl CountingProvider {
        fn returning(result: Result<RelationshipClassification, ClassifyError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result,
            })
        }
    }

    #[async_trait]
    impl RelationshipProvider for CountingProvider {
        async fn classify(
            &self,
            _existing: &str,
            _new: &str,
        ) -> Result<RelationshipClassification, ClassifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn empty_inputs_short_circuit_without_provider_call() {
        let provider = CountingProvider::returning(Ok(RelationshipClassification::Contradicts));
        let service = ClassificationService::new(provider.clone());

        let pairs = [("", "anything"), ("anything", ""), ("  ", "x"), ("", "")];
        for (existing, new) in pairs {
            let label = service.classify(existing, new, None).await.unwrap();
            assert_eq!(label, RelationshipClassification::Similar, "{existing:?}/{new:?}");
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_label_is_returned_as_is() {
        let provider = CountingProvider::returning(Ok(RelationshipClassification::ContainedBy));
        let service = ClassificationService::new(provider.clone());

        let label = service.classify("existing fact", "new fact", None).await.unwrap();
        assert_eq!(label, RelationshipClassification::ContainedBy);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timing_context_records_the_provider_call() {
        let provider = CountingProvider::returning(Ok(RelationshipClassification::Unrelated));
        let service = ClassificationService::new(provider);

        let mut ctx = TimingContext::new();
        service
            .classify("existing", "new", Some(&mut ctx))
            .await
            .unwrap();
        assert!(ctx.stage_ms(CLASSIFY_STAGE).is_some());
    }

    #[tokio::test]
    async fn timing_is_recorded_even_when_provider_fails() {
        let provider =
            CountingProvider::returning(Err(ClassifyError::Provider("timeout".into())));
        let service = ClassificationService::new(provider);

        let mut ctx = TimingContext::new();
        let err = service
            .classify("existing", "new", Some(&mut ctx))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Provider(_)));
        assert!(ctx.stage_ms(CLASSIFY_STAGE).is_some());
    }

    #[tokio::test]
    async fn short_circuit_skips_instrumentation() {
        let provider = CountingProvider::returning(Ok(RelationshipClassification::Similar));
        let service = ClassificationService::new(provider);

        let mut ctx = TimingContext::new();
        service.classify("", "anything", Some(&mut ctx)).await.unwrap();
        assert_eq!(ctx.stage_ms(CLASSIFY_STAGE), None);
    }
}
