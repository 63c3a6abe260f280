use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use embedding::cosine_similarity;
use uuid::Uuid;

use crate::{CandidateMemory, MemoryRecord, MemoryStore, StoreError};

/// Map-backed store with brute-force cosine ranking.
///
/// Lock scope is a single map operation, so holding a std `RwLock` across
/// the sync sections of the async methods is fine; nothing awaits while the
/// guard is alive.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<Uuid, MemoryRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> StoreError {
        StoreError::Backend("record map lock poisoned".into())
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn nearest(
        &self,
        project: Option<&str>,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<CandidateMemory>, StoreError> {
        let records = self.records.read().map_err(|_| Self::lock_poisoned())?;

        let mut hits: Vec<CandidateMemory> = records
            .values()
            .filter(|r| r.is_live() && r.project.as_deref() == project)
            .map(|r| CandidateMemory {
                id: r.id,
                content: r.content.clone(),
                similarity: cosine_similarity(&r.embedding, embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }

    async fn insert(&self, record: MemoryRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| Self::lock_poisoned())?;
        records.insert(record.id, record);
        Ok(())
    }

    async fn supersede(&self, target: Uuid, replacement: MemoryRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| Self::lock_poisoned())?;
        let old = records.get_mut(&target).ok_or(StoreError::NotFound(target))?;
        old.superseded_by = Some(replacement.id);
        old.updated_at = Utc::now();
        records.insert(replacement.id, replacement);
        Ok(())
    }

    async fn touch(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| Self::lock_poisoned())?;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<MemoryRecord>, StoreError> {
        let records = self.records.read().map_err(|_| Self::lock_poisoned())?;
        Ok(records.get(&id).cloned())
    }

    async fn count(&self, project: Option<&str>) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| Self::lock_poisoned())?;
        Ok(records
            .values()
            .filter(|r| r.is_live() && r.project.as_deref() == project)
            .count())
    }
}
