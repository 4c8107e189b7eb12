//! Error taxonomy for the auth core.
//!
//! Two layers, matching the two kinds of failure callers care about:
//!
//! - [`StoreError`]: what a collaborator (record store, blob store)
//!   reports. Kept small: unavailable, conflict, malformed.
//! - [`AuthError`]: what the facade surfaces. Every failure is a normal
//!   return value the UI can pattern-match on; nothing here is fatal.

use thiserror::Error;

/// Failure reported by a backing record or blob store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the call failed outright.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An insert violated a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store answered, but with data this crate cannot interpret.
    #[error("malformed store data: {0}")]
    Malformed(String),
}

/// Tagged error returned by every auth operation.
///
/// `InvalidCredentials` deliberately carries no detail: an unknown
/// username and a wrong password produce the same value, so callers
/// cannot be used as an account-existence oracle.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty after trimming.
    #[error("{0} cannot be empty")]
    InvalidInput(&'static str),

    /// Password shorter than the configured minimum.
    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Sign-up found (or raced against) an existing record for this username.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// Sign-in failed: unknown username or wrong password, indistinguishably.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A backing store failed or timed out.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
