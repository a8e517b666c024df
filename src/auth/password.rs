use sha2::{Digest, Sha256};

/// Unsalted SHA-256 of the password, lowercase hex. Equal passwords give equal digests.
pub fn hash_password(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

pub fn verify_password(plain: &str, digest: &str) -> bool {
    hash_password(plain) == digest
}
