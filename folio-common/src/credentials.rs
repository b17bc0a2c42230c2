//! Salted password hashing for the admin account
//!
//! Passwords are never stored in the clear. Each user row carries a random
//! salt and `SHA-256(salt || password)` as 64 hex characters.
//!
//! # Pure Functions
//!
//! No database or HTTP dependencies here; the users table code in
//! [`crate::db::users`] calls into this module.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt length in bytes before hex encoding
pub const SALT_BYTES: usize = 16;

/// Generate a fresh random salt, hex encoded (32 chars)
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a password with the given salt
///
/// # Examples
///
/// ```
/// use folio_common::credentials::hash_password;
///
/// let hash = hash_password("hunter2", "00ff");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, hash_password("hunter2", "00ff"));
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a candidate password against a stored salt and hash
///
/// The comparison walks the whole string regardless of where the first
/// mismatch is.
pub fn verify_password(candidate: &str, salt: &str, stored_hash: &str) -> bool {
    let computed = hash_password(candidate, salt);
    if computed.len() != stored_hash.len() {
        return false;
    }
    computed
        .bytes()
        .zip(stored_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
