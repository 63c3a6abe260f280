use classify::ClassifyError;
use embedding::EmbeddingError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use store::StoreError;
use thiserror::Error;
use timing::TimingSummary;
use uuid::Uuid;

/// Configuration for the resolution engine.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configs or sent across process boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How many nearest candidates to request from storage.
    #[serde(default = "ResolverConfig::default_top_k")]
    pub top_k: usize,
    /// Candidates below this similarity are not worth a classification
    /// round-trip and are dropped before the policy runs.
    #[serde(default = "ResolverConfig::default_min_similarity")]
    pub min_similarity: f32,
}

impl ResolverConfig {
    pub(crate) fn default_top_k() -> usize {
        5
    }

    pub(crate) fn default_min_similarity() -> f32 {
        0.0
    }

    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.top_k == 0 {
            return Err(ResolveError::InvalidConfig(
                "top_k must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(ResolveError::InvalidConfig(
                "min_similarity must be within [0.0, 1.0]".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            top_k: Self::default_top_k(),
            min_similarity: Self::default_min_similarity(),
        }
    }
}

/// One new memory item to resolve against a partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Free-form project label; normalized internally into the partition key.
    #[serde(default)]
    pub project: Option<String>,
    /// The new memory text.
    pub content: String,
    /// Opaque caller attributes carried onto an inserted record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsonValue>,
}

impl ResolveRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            project: None,
            content: content.into(),
            attributes: None,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

/// The storage decision derived for one new memory item.
///
/// `Conflict` is a legitimate, expected outcome the caller must act on;
/// it is a value here, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    /// No related content exists; store a new independent record.
    Insert,
    /// Near-duplicate of the best-matching record; nothing stored.
    Duplicate,
    /// The best-matching record already subsumes the new text; nothing
    /// stored, the existing record's recency gets bumped.
    Redundant,
    /// The new text subsumes the best-matching record and replaces it.
    Supersede,
    /// The new text contradicts stored content; flagged for manual
    /// resolution, nothing is mutated.
    Conflict,
}

/// Outcome of one resolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub decision: Decision,
    /// Record created by the commit step (insert / supersede); `None` for a
    /// dry resolve or a decision that stores nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_id: Option<Uuid>,
    /// The candidate that drove the decision: the contradicting record for
    /// `Conflict`, the top candidate otherwise; `None` for `Insert`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<Uuid>,
    /// How many candidates were classified before the run terminated.
    pub candidates_considered: usize,
    /// Per-stage durations and total elapsed time for this run.
    pub timings: TimingSummary,
}

/// Errors produced by the resolution engine.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid resolver config: {0}")]
    InvalidConfig(String),
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
