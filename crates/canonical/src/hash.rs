//! Canonical identity hashes.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! The normalization version is mixed in so two behaviors of the pipeline can
//! never produce the same identity for the same text.

use sha2::{Digest, Sha256};

/// Version-aware SHA-256 of a canonical form, hex encoded.
pub fn hash_canonical_bytes(canonical_version: u32, canonical_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_bytes);
    hex::encode(hasher.finalize())
}
