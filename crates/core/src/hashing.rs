//! Shared SHA-256 hex digest utility.
//!
//! Used to stamp the content version of a backing file so optimistic
//! writers can detect that the file changed underneath them.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}
