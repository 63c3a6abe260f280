use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A stored memory item.
///
/// `project` is the already-normalized partition key (see the `namespace`
/// crate); storing a raw label here is a caller bug. Superseded records stay
/// in the store with `superseded_by` set so the history of a fact remains
/// walkable, but they are invisible to similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: Uuid,
    pub project: Option<String>,
    pub content: String,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsonValue>,
}

impl MemoryRecord {
    /// Fresh live record with a random id and now-timestamps.
    pub fn new(project: Option<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project,
            content: content.into(),
            embedding,
            created_at: now,
            updated_at: now,
            superseded_by: None,
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: JsonValue) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// A record is live until something supersedes it.
    pub fn is_live(&self) -> bool {
        self.superseded_by.is_none()
    }
}

/// The candidate view the resolver consumes: one nearest-neighbor hit,
/// ranked by embedding similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMemory {
    pub id: Uuid,
    pub content: String,
    pub similarity: f32,
}
