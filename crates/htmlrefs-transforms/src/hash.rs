//! Content hashing for cache-busted asset names.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of the content.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// `<digest>.<extension>` for the given content.
pub fn hashed_filename(content: &[u8], extension: &str) -> String {
    format!("{}.{}", content_hash(content), extension)
}
