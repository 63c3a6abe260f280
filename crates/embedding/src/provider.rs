use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::{EmbeddingConfig, EmbeddingError};

// Shared HTTP client with connection pooling. Per-request timeouts come from
// the config so one client serves every provider instance.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(32)
        .build()
        .expect("failed to build HTTP client")
});

/// Capability interface for the external embedding provider.
///
/// The core never reimplements the provider's intelligence; it calls this
/// narrow contract and treats every failure as opaque. Substituting a
/// deterministic stub in tests is the point of keeping it this small.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model label to stamp onto produced embeddings.
    fn model_name(&self) -> &str;

    /// Embed one piece of text. Input validation happens upstream in the
    /// service; implementations may assume non-empty text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Clone, Copy)]
enum ApiProviderKind {
    OpenAi,
    HuggingFace,
    Custom,
}

fn api_provider_kind(cfg: &EmbeddingConfig) -> ApiProviderKind {
    match cfg
        .api_provider
        .as_deref()
        .unwrap_or("custom")
        .to_ascii_lowercase()
        .as_str()
    {
        "openai" | "gpt" => ApiProviderKind::OpenAi,
        "hf" | "huggingface" => ApiProviderKind::HuggingFace,
        _ => ApiProviderKind::Custom,
    }
}

/// HTTP adapter for a remote embedding endpoint.
#[derive(Debug)]
pub struct HttpEmbeddingProvider {
    cfg: EmbeddingConfig,
    url: String,
}

impl HttpEmbeddingProvider {
    pub fn new(cfg: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let url = cfg
            .api_url
            .clone()
            .ok_or_else(|| EmbeddingError::InvalidConfig("api_url is required".into()))?;
        Ok(Self { cfg, url })
    }

    fn build_payload(&self, text: &str) -> Value {
        match api_provider_kind(&self.cfg) {
            ApiProviderKind::OpenAi => json!({ "input": text, "model": self.cfg.model_name }),
            ApiProviderKind::HuggingFace => json!({ "inputs": text }),
            ApiProviderKind::Custom => json!({ "text": text, "model": self.cfg.model_name }),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    fn model_name(&self) -> &str {
        &self.cfg.model_name
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut request = HTTP_CLIENT
            .post(&self.url)
            .timeout(Duration::from_secs(self.cfg.api_timeout_secs))
            .header("Content-Type", "application/json");
        if let Some(header) = self.cfg.api_auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(&self.build_payload(text))
            .send()
            .await
            .map_err(|e| EmbeddingError::Provider(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Provider(format!("HTTP error {status}: {body}")));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| EmbeddingError::Provider(format!("invalid JSON response: {e}")))?;

        let vector = parse_embedding_response(value)?;
        tracing::debug!(dim = vector.len(), "embedding response parsed");
        Ok(vector)
    }
}

/// Pull a single vector out of the common embedding response shapes:
/// `{"embedding": [...]}`; `{"embeddings": [[...]]}`; OpenAI-style
/// `{"data": [{"embedding": [...]}]}`; or a bare array.
pub(crate) fn parse_embedding_response(value: Value) -> Result<Vec<f32>, EmbeddingError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embedding) = map.remove("embedding") {
                return parse_vector(embedding);
            }
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_first_of_collection(embeddings);
            }
            if let Some(Value::Array(items)) = map.remove("data") {
                let first = items.into_iter().next().ok_or_else(|| {
                    EmbeddingError::Provider("empty `data` array in response".into())
                })?;
                return match first {
                    Value::Object(mut obj) => obj.remove("embedding").map_or_else(
                        || {
                            Err(EmbeddingError::Provider(
                                "missing `embedding` field in data item".into(),
                            ))
                        },
                        parse_vector,
                    ),
                    _ => Err(EmbeddingError::Provider(
                        "unexpected entry inside `data` array".into(),
                    )),
                };
            }
            Err(EmbeddingError::Provider("unsupported response shape".into()))
        }
        other => parse_first_of_collection(other),
    }
}

fn parse_first_of_collection(value: Value) -> Result<Vec<f32>, EmbeddingError> {
    match value {
        Value::Array(items) if items.iter().all(|i| matches!(i, Value::Array(_))) => items
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Provider("response contained no embeddings".into()))
            .and_then(parse_vector),
        other => parse_vector(other),
    }
}

fn parse_vector(value: Value) -> Result<Vec<f32>, EmbeddingError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num.as_f64().map(|f| f as f32).ok_or_else(|| {
                    EmbeddingError::Provider("non-finite embedding value".into())
                }),
                other => Err(EmbeddingError::Provider(format!(
                    "embedding entries must be numbers, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(EmbeddingError::Provider(format!(
            "embedding vector must be an array, got {other:?}"
        ))),
    }
}
