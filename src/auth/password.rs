//! One-way password hashing.

use bcrypt::{hash, verify};
use tracing::warn;

use crate::Result;

/// bcrypt work factor used for every stored password.
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String> {
    Ok(hash(plaintext, BCRYPT_COST)?)
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(plaintext: &str, password_hash: &str) -> bool {
    match verify(plaintext, password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}
