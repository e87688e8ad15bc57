//! API key hashing.
//!
//! The raw key is used only as input to this digest; it is never persisted,
//! cached, or logged. Records in storage and entries in the validation cache
//! are both addressed by the digest.

use sha2::{Digest, Sha256};

/// Returns the lowercase hex SHA-256 digest of the given key.
#[must_use]
pub fn hash_api_key(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    hex::encode(digest)
}
