use thiserror::Error;

/// Errors surfaced by the classification service and its providers.
#[derive(Debug, Clone, Error)]
pub enum ClassifyError {
    /// Configuration is inconsistent (e.g., missing endpoint).
    #[error("invalid classification config: {0}")]
    InvalidConfig(String),
    /// Any provider-side failure: transport error, timeout, quota,
    /// malformed response. Propagated unchanged, never retried here.
    #[error("classification provider failure: {0}")]
    Provider(String),
}
