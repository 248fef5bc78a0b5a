//! Shared SHA-256 hex digest utility.
//!
//! Used for file fingerprints and for deriving asset unique IDs.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Derive the unique ID of a measurement file.
///
/// Hashes `"{file_name}-{unix_millis}-{file_hash}"`, so the same file
/// ingested at two different instants yields two distinct IDs.
pub fn file_unique_id(file_name: &str, unix_millis: i64, file_hash: &str) -> String {
    sha256_hex(format!("{file_name}-{unix_millis}-{file_hash}").as_bytes())
}
