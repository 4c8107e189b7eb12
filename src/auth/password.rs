//! Salted one-way password hashing.
//!
//! Argon2id through the PHC string format: every hash carries its own
//! random salt and parameters, so verification needs nothing but the
//! stored string. The record store only ever sees these strings; a
//! plaintext password never leaves the facade.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

use crate::error::{AuthError, StoreError};

/// Hash a password with a fresh random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Unavailable(format!("password hashing failed: {e}")).into())
}

/// Verify a password against a stored PHC hash string.
///
/// A mismatch is `Ok(false)`; only an unparseable stored hash is an
/// error (the record is damaged, not the caller's input).
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| StoreError::Malformed(format!("stored password hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(StoreError::Malformed(format!("password verification: {e}")).into()),
    }
}

/// Hash to verify against when a sign-in names an unknown username, so
/// the absent and mismatch paths do comparable work.
pub(crate) fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| hash_password("latchkey-decoy").unwrap_or_default())
}
