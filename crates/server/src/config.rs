use classify::ClassifyConfig;
use embedding::EmbeddingConfig;
use resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// One provisioned API key: the non-secret display/lookup prefix plus the
/// SHA-256 hash of the full token. Raw tokens are never configured.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiKeyEntry {
    pub prefix: String,
    pub hash: String,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Rate limit: requests per minute per API key
    #[serde(default = "default_rate_limit_per_minute")]
    pub rate_limit_per_minute: u32,

    /// Provisioned API keys (prefix + hash; raw tokens live with clients)
    #[serde(default)]
    pub api_keys: Vec<ApiKeyEntry>,

    /// Allow `POST /api/v1/keys` to mint keys at runtime (dev/self-hosted)
    #[serde(default)]
    pub allow_key_issuance: bool,

    /// Provider wiring: `"api"` for the HTTP providers, `"stub"` for the
    /// deterministic in-process ones (tests, offline development)
    #[serde(default = "default_provider_mode")]
    pub provider_mode: String,

    /// Embedding provider settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Relationship-classification provider settings
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Resolution policy settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            rate_limit_per_minute: default_rate_limit_per_minute(),
            api_keys: Vec::new(),
            allow_key_issuance: false,
            provider_mode: default_provider_mode(),
            embedding: EmbeddingConfig::default(),
            classify: ClassifyConfig::default(),
            resolver: ResolverConfig::default(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `memcore` config file, overridden
    /// by `MEMCORE__`-prefixed environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("memcore").required(false))
            .add_source(config::Environment::with_prefix("MEMCORE").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // Mint a development key if none are provisioned. The raw token is
        // logged exactly once and never stored.
        if config.api_keys.is_empty() {
            let issued = identity::generate_api_key();
            tracing::warn!(
                prefix = %issued.prefix,
                "no API keys configured; issued development key {}",
                issued.key
            );
            config.api_keys.push(ApiKeyEntry {
                prefix: issued.prefix,
                hash: issued.hash,
            });
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    2
}

fn default_rate_limit_per_minute() -> u32 {
    120
}

fn default_provider_mode() -> String {
    "stub".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
