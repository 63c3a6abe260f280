use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{ClassifyError, RelationshipClassification};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(32)
        .build()
        .expect("failed to build HTTP client")
});

/// Capability interface for the external relationship-classification
/// provider. Implementations receive the ordered pair (existing, new) and
/// must answer with exactly one canonical label.
#[async_trait]
pub trait RelationshipProvider: Send + Sync {
    async fn classify(
        &self,
        existing: &str,
        new: &str,
    ) -> Result<RelationshipClassification, ClassifyError>;
}

/// Runtime configuration for the HTTP classification provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Model label sent along with each request.
    pub model_name: String,
    /// Classification endpoint.
    pub api_url: Option<String>,
    /// Authorization header value.
    pub api_auth_header: Option<String>,
    /// Per-call timeout in seconds; a timeout surfaces as a provider failure.
    pub api_timeout_secs: u64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            model_name: "memory-relationship-v1".into(),
            api_url: None,
            api_auth_header: None,
            api_timeout_secs: 30,
        }
    }
}

/// HTTP adapter for a remote classification endpoint.
#[derive(Debug)]
pub struct HttpRelationshipProvider {
    cfg: ClassifyConfig,
    url: String,
}

impl HttpRelationshipProvider {
    pub fn new(cfg: ClassifyConfig) -> Result<Self, ClassifyError> {
        let url = cfg
            .api_url
            .clone()
            .ok_or_else(|| ClassifyError::InvalidConfig("api_url is required".into()))?;
        Ok(Self { cfg, url })
    }
}

#[async_trait]
impl RelationshipProvider for HttpRelationshipProvider {
    async fn classify(
        &self,
        existing: &str,
        new: &str,
    ) -> Result<RelationshipClassification, ClassifyError> {
        let payload = json!({
            "existing_content": existing,
            "new_content": new,
            "model": self.cfg.model_name,
        });

        let mut request = HTTP_CLIENT
            .post(&self.url)
            .timeout(Duration::from_secs(self.cfg.api_timeout_secs))
            .header("Content-Type", "application/json");
        if let Some(header) = self.cfg.api_auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClassifyError::Provider(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Provider(format!("HTTP error {status}: {body}")));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ClassifyError::Provider(format!("invalid JSON response: {e}")))?;

        parse_classification_response(value)
    }
}

/// Extract a label from the common response shapes:
/// `{"relationship": "<label>"}`, `{"label": "<label>"}`, or a bare string.
/// A well-formed response carrying an out-of-vocabulary label falls back to
/// `similar` (the enum's conservative default) rather than failing the
/// whole resolution run.
pub(crate) fn parse_classification_response(
    value: Value,
) -> Result<RelationshipClassification, ClassifyError> {
    let text = match &value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map
            .get("relationship")
            .or_else(|| map.get("label"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClassifyError::Provider("response missing `relationship` label".into())
            })?,
        _ => {
            return Err(ClassifyError::Provider(format!(
                "unsupported response shape: {value}"
            )))
        }
    };

    Ok(text.parse().unwrap_or_else(|err| {
        tracing::debug!(%err, "out-of-vocabulary label, falling back to `similar`");
        RelationshipClassification::Similar
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relationship_field() {
        let label =
            parse_classification_response(json!({"relationship": "contradicts"})).unwrap();
        assert_eq!(label, RelationshipClassification::Contradicts);
    }

    #[test]
    fn parses_label_field_and_bare_string() {
        let label = parse_classification_response(json!({"label": "contained-by"})).unwrap();
        assert_eq!(label, RelationshipClassification::ContainedBy);

        let label = parse_classification_response(json!("unrelated")).unwrap();
        assert_eq!(label, RelationshipClassification::Unrelated);
    }

    #[test]
    fn unknown_label_falls_back_to_similar() {
        let label = parse_classification_response(json!({"relationship": "kind-of-related"}))
            .unwrap();
        assert_eq!(label, RelationshipClassification::Similar);
    }

    #[test]
    fn missing_label_is_a_provider_failure() {
        assert!(parse_classification_response(json!({"verdict": "similar"})).is_err());
        assert!(parse_classification_response(json!(42)).is_err());
    }

    #[test]
    fn http_provider_requires_url() {
        let err = HttpRelationshipProvider::new(ClassifyConfig::default()).unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidConfig(_)));
    }
}
