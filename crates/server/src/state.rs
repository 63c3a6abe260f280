use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use classify::{ClassificationService, HeuristicRelationshipProvider};
use dashmap::DashMap;
use embedding::{EmbeddingService, StubEmbeddingProvider};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use resolver::Resolver;
use std::sync::Arc;
use std::time::Instant;
use store::{InMemoryStore, MemoryStore};
use subtle::ConstantTimeEq;

/// Shared application state
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: key prefix -> (count, window start)
    pub rate_limiter: DashMap<String, (u32, Instant)>,

    /// API key table: prefix -> hashes of the full tokens sharing it
    keys: DashMap<String, Vec<String>>,

    /// Memory store (shared with the resolver)
    pub store: Arc<dyn MemoryStore>,

    /// Resolution engine
    pub resolver: Arc<Resolver>,

    /// Prometheus scrape handle, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,

    started_at: Instant,
}

impl ServerState {
    /// Create new server state.
    ///
    /// The bundled store is in-memory; a persistent deployment swaps in a
    /// backend implementing the same `MemoryStore` trait.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn MemoryStore> = Arc::new(InMemoryStore::new());

        let (embedding, classify) = match config.provider_mode.as_str() {
            "api" => (
                EmbeddingService::from_config(config.embedding.clone())
                    .map_err(|e| ServerError::Config(e.to_string()))?,
                ClassificationService::from_config(config.classify.clone())
                    .map_err(|e| ServerError::Config(e.to_string()))?,
            ),
            _ => (
                EmbeddingService::new(Arc::new(StubEmbeddingProvider::new(
                    config.embedding.stub_dim,
                ))),
                ClassificationService::new(Arc::new(HeuristicRelationshipProvider)),
            ),
        };

        let resolver = Arc::new(Resolver::new(
            embedding,
            classify,
            store.clone(),
            config.resolver.clone(),
        )?);

        let metrics = if config.metrics_enabled {
            Some(install_metrics_recorder()?)
        } else {
            None
        };

        let keys = DashMap::new();
        for entry in &config.api_keys {
            keys.entry(entry.prefix.clone())
                .or_insert_with(Vec::new)
                .push(entry.hash.clone());
        }

        Ok(Self {
            config: Arc::new(config),
            rate_limiter: DashMap::new(),
            keys,
            store,
            resolver,
            metrics,
            started_at: Instant::now(),
        })
    }

    /// Validate a presented raw API key: look the table up by prefix, then
    /// verify the token hash in constant time.
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        let prefix = identity::extract_key_prefix(key);
        let Some(hashes) = self.keys.get(&prefix) else {
            return false;
        };
        let presented = identity::hash_api_key(key);
        hashes
            .iter()
            .any(|stored| stored.as_bytes().ct_eq(presented.as_bytes()).into())
    }

    /// Register a freshly issued key so it authenticates immediately.
    pub fn register_key(&self, prefix: String, hash: String) {
        self.keys.entry(prefix).or_insert_with(Vec::new).push(hash);
    }

    /// Fixed-window rate limit per key prefix.
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;
        let prefix = identity::extract_key_prefix(key);

        let mut entry = self.rate_limiter.entry(prefix).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

fn install_metrics_recorder() -> ServerResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Config(format!("failed to install metrics recorder: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKeyEntry;

    fn state_with_key() -> (ServerState, String) {
        let issued = identity::generate_api_key();
        let config = ServerConfig {
            api_keys: vec![ApiKeyEntry {
                prefix: issued.prefix.clone(),
                hash: issued.hash.clone(),
            }],
            metrics_enabled: false,
            ..Default::default()
        };
        (ServerState::new(config).unwrap(), issued.key)
    }

    #[test]
    fn valid_key_authenticates() {
        let (state, key) = state_with_key();
        assert!(state.is_valid_api_key(&key));
    }

    #[test]
    fn unknown_or_mangled_key_is_rejected() {
        let (state, key) = state_with_key();
        assert!(!state.is_valid_api_key("mc_definitely-not-issued"));
        // Same prefix, different tail: prefix lookup succeeds, hash check fails.
        let mut mangled = key.clone();
        mangled.pop();
        mangled.push('x');
        assert!(!state.is_valid_api_key(&mangled));
    }

    #[test]
    fn runtime_registered_key_authenticates() {
        let (state, _) = state_with_key();
        let issued = identity::generate_api_key();
        state.register_key(issued.prefix.clone(), issued.hash.clone());
        assert!(state.is_valid_api_key(&issued.key));
    }

    #[test]
    fn rate_limit_caps_requests_per_window() {
        let issued = identity::generate_api_key();
        let config = ServerConfig {
            rate_limit_per_minute: 3,
            api_keys: vec![ApiKeyEntry {
                prefix: issued.prefix.clone(),
                hash: issued.hash.clone(),
            }],
            metrics_enabled: false,
            ..Default::default()
        };
        let state = ServerState::new(config).unwrap();

        for _ in 0..3 {
            assert!(state.check_rate_limit(&issued.key));
        }
        assert!(!state.check_rate_limit(&issued.key));
    }
}
