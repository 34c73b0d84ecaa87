use crate::config::AdminConfig;
use sha2::{Digest, Sha256};

pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Length-guarded constant-time comparison. Credential and token checks go
/// through here so a mismatch position cannot be timed.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Admin login check: both the username and the SHA-256 of the supplied
/// password must match the configured values.
pub fn verify_admin_credentials(admin: &AdminConfig, username: &str, password: &str) -> bool {
    let user_match = constant_time_eq(username.as_bytes(), admin.username.as_bytes());
    let pass_match = constant_time_eq(
        sha256_hex(password).as_bytes(),
        admin.password_sha256.to_lowercase().as_bytes(),
    );
    user_match && pass_match
}
