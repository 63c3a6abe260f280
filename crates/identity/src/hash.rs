use sha2::{Digest, Sha256};

/// One-way hash of a raw API key for storage and lookup verification.
///
/// SHA-256, lowercase hex. Deterministic: re-presenting the same raw token
/// always re-derives the same stored hash, which is what makes the
/// prefix-lookup-then-hash-compare pattern work.
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
