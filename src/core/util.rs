//! Common utilities

use xxhash_rust::xxh3::xxh3_64;

/// Compute a short XXH3 content hash, hex encoded.
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}
