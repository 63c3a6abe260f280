use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by memory store backends.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("memory record not found: {0}")]
    NotFound(Uuid),
    /// Backend-specific failure (connection loss, serialization, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}
