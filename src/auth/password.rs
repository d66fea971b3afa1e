use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of the plaintext password, unsalted.
/// Digests already stored by earlier deployments verify against this as-is;
/// changing the scheme only touches this function and `Doctor::verify`.
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}
