use thiserror::Error;

/// Errors surfaced by the embedding service and its providers.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Caller-supplied text failed a precondition. Raised before any
    /// external call is made; never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Configuration is inconsistent (e.g., API mode without an endpoint).
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    /// Any provider-side failure: transport error, timeout, quota
    /// exhaustion, or a malformed response. Propagated unchanged; retry
    /// policy, if any, belongs to the caller.
    #[error("embedding provider failure: {0}")]
    Provider(String),
}
