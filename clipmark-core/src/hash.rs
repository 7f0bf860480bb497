//! Content hashing for note identity

use sha2::{Digest, Sha256};

/// Hex characters kept from the SHA-256 digest.
const HASH_LEN: usize = 8;

/// Compute the dedup identity of a note's normalized text.
///
/// The hash is derived from the text alone, never from location or date, so
/// the same highlight produces the same identity no matter when or where it
/// was parsed. Truncating to 8 hex characters makes collisions possible in
/// principle; a colliding note would be treated as a duplicate of the first
/// by the dedup gate. This is an accepted residual risk, not detected here.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_LEN].to_string()
}
