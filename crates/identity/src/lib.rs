//! API key issuance and storage hashing.
//!
//! Issued keys look like `mc_LbxGLEluyQ9DbvM6xVp4N1nMXGbd7VPo`: a fixed tag
//! followed by 24 random bytes in URL-safe base64. The first
//! [`API_KEY_PREFIX_LEN`] characters are the non-secret display/lookup
//! prefix; the full token is SHA-256 hashed before it ever touches storage,
//! so the raw key exists only in the issuance response. Lookup composes as
//! "find rows by prefix, verify by hash comparison"; that composition
//! belongs to the storage/server layer, not here.

mod apikey;
mod hash;

pub use apikey::{extract_key_prefix, generate_api_key, IssuedApiKey, API_KEY_PREFIX_LEN, API_KEY_TAG};
pub use hash::hash_api_key;
