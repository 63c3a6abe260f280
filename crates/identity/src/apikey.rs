use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::hash::hash_api_key;

/// Literal tag every issued key starts with.
pub const API_KEY_TAG: &str = "mc_";

/// Length of the non-secret display/lookup prefix.
pub const API_KEY_PREFIX_LEN: usize = 11;

/// Number of random bytes behind each key.
const API_KEY_RANDOM_BYTES: usize = 24;

/// A freshly issued key. `key` is the only copy of the raw token; `hash` is
/// what storage keeps, `prefix` is what dashboards may display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedApiKey {
    pub key: String,
    pub prefix: String,
    pub hash: String,
}

/// Issue a new API key from the operating system's CSPRNG.
///
/// 24 random bytes, URL-safe base64 without padding, behind the `mc_` tag.
/// `OsRng` is required here; a seedable general-purpose PRNG is not
/// acceptable for key material.
pub fn generate_api_key() -> IssuedApiKey {
    let mut raw = [0u8; API_KEY_RANDOM_BYTES];
    OsRng.fill_bytes(&mut raw);

    let key = format!("{API_KEY_TAG}{}", URL_SAFE_NO_PAD.encode(raw));
    let prefix = extract_key_prefix(&key);
    let hash = hash_api_key(&key);

    IssuedApiKey { key, prefix, hash }
}

/// First [`API_KEY_PREFIX_LEN`] characters of `key`.
///
/// Pure and shape-agnostic: shorter input returns the whole string, and the
/// cut is made on character boundaries so arbitrary input cannot panic.
/// Validating that `key` actually looks like an issued key is the caller's
/// responsibility.
pub fn extract_key_prefix(key: &str) -> String {
    key.chars().take(API_KEY_PREFIX_LEN).collect()
}
