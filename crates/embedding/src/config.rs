use serde::{Deserialize, Serialize};

/// Runtime configuration for the HTTP embedding provider.
///
/// # Example
/// ```
/// use embedding::EmbeddingConfig;
///
/// let cfg = EmbeddingConfig {
///     api_url: Some("https://api.openai.com/v1/embeddings".into()),
///     api_auth_header: Some("Bearer sk-xxx".into()),
///     api_provider: Some("openai".into()),
///     ..Default::default()
/// };
/// assert_eq!(cfg.api_timeout_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Friendly label surfaced on every [`Embedding`](crate::Embedding).
    pub model_name: String,
    /// Inference endpoint.
    pub api_url: Option<String>,
    /// Authorization header value (e.g., `"Bearer sk-xxx"`).
    pub api_auth_header: Option<String>,
    /// Remote provider hint: `"openai"`, `"hf"`, or `"custom"` (default).
    /// Controls the request payload shape.
    pub api_provider: Option<String>,
    /// Per-call timeout in seconds; a timeout surfaces as a provider failure.
    pub api_timeout_secs: u64,
    /// Vector dimensionality for the deterministic stub provider.
    pub stub_dim: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: "text-embedding-3-small".into(),
            api_url: None,
            api_auth_header: None,
            api_provider: None,
            api_timeout_secs: 30,
            stub_dim: 384,
        }
    }
}
