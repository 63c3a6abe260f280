//! Storage contract for memory records.
//!
//! The persistent engine is an external collaborator; the core consumes this
//! narrow trait and nothing else. [`InMemoryStore`] is the bundled backend
//! for tests, ephemeral deployments, and local development; production
//! backends implement the same trait behind the same semantics.

mod error;
mod memory;
mod types;

pub use crate::error::StoreError;
pub use crate::memory::InMemoryStore;
pub use crate::types::{CandidateMemory, MemoryRecord};

use async_trait::async_trait;
use uuid::Uuid;

/// What the resolution pipeline needs from storage.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Top-K live records of the given partition, ranked by embedding
    /// similarity descending. Superseded records never appear.
    async fn nearest(
        &self,
        project: Option<&str>,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<CandidateMemory>, StoreError>;

    /// Persist a new independent record.
    async fn insert(&self, record: MemoryRecord) -> Result<(), StoreError>;

    /// Soft-delete `target` (marking it superseded by the replacement's id)
    /// and persist `replacement` in one step.
    async fn supersede(&self, target: Uuid, replacement: MemoryRecord) -> Result<(), StoreError>;

    /// Bump a record's recency metadata without touching its content.
    async fn touch(&self, id: Uuid) -> Result<(), StoreError>;

    /// Fetch one record by id, superseded or not.
    async fn get(&self, id: Uuid) -> Result<Option<MemoryRecord>, StoreError>;

    /// Number of live records in the given partition.
    async fn count(&self, project: Option<&str>) -> Result<usize, StoreError>;
}
