use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a file's text.
///
/// Deterministic; fingerprint equality is treated as content equality.
/// Used for change detection only, never as an integrity guarantee.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
