use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`. Used as the content identity of files.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
