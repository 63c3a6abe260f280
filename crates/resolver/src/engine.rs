use std::sync::Arc;

use classify::{ClassificationService, RelationshipClassification};
use embedding::{Embedding, EmbeddingService};
use namespace::normalize_project_name;
use store::{MemoryRecord, MemoryStore};
use timing::TimingContext;

use crate::types::{Decision, Resolution, ResolveError, ResolveRequest, ResolverConfig};


/// Stage name for the embedding call in a run's timing summary.
pub const EMBED_STAGE: &str = "generate_embedding";

/// Stage name for the nearest-neighbor lookup.
pub const SEARCH_STAGE: &str = "vector_search";

/// The decision engine: embeds a new memory text, classifies it against the
/// nearest stored candidates, and derives one storage decision.
///
/// A run is logically sequential: the candidate list depends on the
/// embedding, and the policy short-circuits in similarity order. Candidates
/// are classified one at a time, most-similar first, each at most once; the
/// loop terminates at the first decisive label.
pub struct Resolver {
    embedding: EmbeddingService,
    classify: ClassificationService,
    store: Arc<dyn MemoryStore>,
    cfg: ResolverConfig,
}

impl Resolver {
    pub fn new(
        embedding: EmbeddingService,
        classify: ClassificationService,
        store: Arc<dyn MemoryStore>,
        cfg: ResolverConfig,
    ) -> Result<Self, ResolveError> {
        cfg.validate()?;
        Ok(Self {
            embedding,
            classify,
            store,
            cfg,
        })
    }

    /// Derive the storage decision for `req` without mutating anything.
    pub async fn resolve(&self, req: &ResolveRequest) -> Result<Resolution, ResolveError> {
        let (resolution, _, _) = self.run(req).await?;
        Ok(resolution)
    }

    /// Derive the decision and apply it to the store.
    ///
    /// `Insert` persists a fresh record; `Supersede` soft-deletes the
    /// matched record and persists the replacement; `Redundant` bumps the
    /// matched record's recency. `Duplicate` and `Conflict` mutate nothing;
    /// a contradicting record is never silently inserted.
    pub async fn resolve_and_commit(
        &self,
        req: &ResolveRequest,
    ) -> Result<Resolution, ResolveError> {
        let (mut resolution, embedding, project) = self.run(req).await?;

        match resolution.decision {
            Decision::Insert => {
                let mut record = MemoryRecord::new(project, &req.content, embedding.vector);
                if let Some(attributes) = req.attributes.clone() {
                    record = record.with_attributes(attributes);
                }
                resolution.memory_id = Some(record.id);
                self.store.insert(record).await?;
            }
            Decision::Supersede => {
                if let Some(target) = resolution.matched {
                    let mut record = MemoryRecord::new(project, &req.content, embedding.vector);
                    if let Some(attributes) = req.attributes.clone() {
                        record = record.with_attributes(attributes);
                    }
                    resolution.memory_id = Some(record.id);
                    self.store.supersede(target, record).await?;
                }
            }
            Decision::Redundant => {
                if let Some(target) = resolution.matched {
                    self.store.touch(target).await?;
                }
            }
            Decision::Duplicate | Decision::Conflict => {}
        }

        Ok(resolution)
    }

    /// One resolution run: embed, search, classify in rank order, decide.
    ///
    /// Returns the embedding and normalized partition alongside the
    /// resolution so the commit step can persist without recomputing.
    async fn run(
        &self,
        req: &ResolveRequest,
    ) -> Result<(Resolution, Embedding, Option<String>), ResolveError> {
        let project = normalize_project_name(req.project.as_deref());
        let mut ctx = TimingContext::new();

        let embedding = ctx
            .time(EMBED_STAGE, self.embedding.generate(&req.content))
            .await?;

        let candidates = ctx
            .time(
                SEARCH_STAGE,
                self.store
                    .nearest(project.as_deref(), &embedding.vector, self.cfg.top_k),
            )
            .await?;
        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|c| c.similarity >= self.cfg.min_similarity)
            .collect();

        let mut decision = Decision::Insert;
        let mut matched = None;
        let mut considered = 0;

        for (rank, candidate) in candidates.iter().enumerate() {
            considered += 1;
            let label = self
                .classify
                .classify(&candidate.content, &req.content, Some(&mut ctx))
                .await?;
            tracing::debug!(
                candidate = %candidate.id,
                rank,
                similarity = candidate.similarity,
                label = %label,
                "classified candidate"
            );

            // A contradiction anywhere is decisive. The other labels decide
            // the run only on the top candidate; below it, everything but
            // `contradicts` is a non-signal and the scan continues.
            match label {
                RelationshipClassification::Contradicts => {
                    decision = Decision::Conflict;
                    matched = Some(candidate.id);
                    break;
                }
                RelationshipClassification::ContainedBy if rank == 0 => {
                    decision = Decision::Redundant;
                    matched = Some(candidate.id);
                    break;
                }
                RelationshipClassification::Contains if rank == 0 => {
                    decision = Decision::Supersede;
                    matched = Some(candidate.id);
                    break;
                }
                RelationshipClassification::Similar if rank == 0 => {
                    decision = Decision::Duplicate;
                    matched = Some(candidate.id);
                    break;
                }
                RelationshipClassification::Similar
                | RelationshipClassification::Contains
                | RelationshipClassification::ContainedBy
                | RelationshipClassification::Unrelated => {}
            }
        }

        let resolution = Resolution {
            decision,
            memory_id: None,
            matched,
            candidates_considered: considered,
            timings: ctx.snapshot(),
        };

        tracing::debug!(
            decision = ?resolution.decision,
            candidates = resolution.candidates_considered,
            total_ms = resolution.timings.total_ms,
            "resolution run complete"
        );

        Ok((resolution, embedding, project))
    }
}
