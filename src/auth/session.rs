//! Current-user session persisted through a blob store.
//!
//! Provides:
//! - [`SessionManager::set`]: serialize and store the signed-in user
//! - [`SessionManager::get`]: read it back, or `None`
//! - [`SessionManager::clear`]: sign-out, idempotent
//!
//! ## Design Decisions
//!
//! - **Reads never fail.** A missing, unreadable, or corrupted session
//!   blob means "nobody is signed in", not an error the caller has to
//!   handle. The defect is logged at debug level and the blob is left
//!   in place for inspection.
//! - **Only [`CurrentUser`] goes in.** The session value is typed, so
//!   a credential hash cannot end up in the blob by accident.

use crate::auth::credentials::CurrentUser;
use crate::blob::BlobStore;
use crate::error::{AuthError, StoreError};

/// Persists the signed-in user under one well-known blob key.
pub struct SessionManager<B> {
    blob: B,
    key: String,
}

impl<B: BlobStore> SessionManager<B> {
    /// Store sessions in `blob` under `key`.
    pub fn new(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    /// The signed-in user, or `None` when there is no usable session.
    pub fn get(&self) -> Option<CurrentUser> {
        let raw = match self.blob.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("Session blob unreadable: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("Session blob malformed, treating as signed out: {}", e);
                None
            }
        }
    }

    /// Replace the session with `user`.
    pub fn set(&self, user: &CurrentUser) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| StoreError::Malformed(format!("session encode: {e}")))?;
        self.blob.write(&self.key, &raw)?;
        Ok(())
    }

    /// Remove the session. Succeeds when none exists.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.blob.remove(&self.key)?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;

    fn test_session() -> (MemoryBlobStore, SessionManager<MemoryBlobStore>) {
        let blob = MemoryBlobStore::new();
        (blob.clone(), SessionManager::new(blob, "current_user"))
    }

    fn alice() -> CurrentUser {
        CurrentUser {
            id: "1".into(),
            username: "alice".into(),
            nickname: "Alice A".into(),
        }
    }

    #[test]
    fn empty_store_has_no_session() {
        let (_blob, session) = test_session();
        assert!(session.get().is_none());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let (_blob, session) = test_session();

        session.set(&alice()).unwrap();
        assert_eq!(session.get(), Some(alice()));
    }

    #[test]
    fn malformed_blob_reads_as_signed_out() {
        let (blob, session) = test_session();

        blob.write("current_user", "{not json").unwrap();
        assert!(session.get().is_none());
        // The broken blob stays put until the next set or clear.
        assert_eq!(blob.read("current_user").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn clear_is_idempotent() {
        let (_blob, session) = test_session();

        session.set(&alice()).unwrap();
        session.clear().unwrap();
        assert!(session.get().is_none());
        session.clear().unwrap();
    }

    #[test]
    fn stored_blob_is_plain_user_fields() {
        let (blob, session) = test_session();

        session.set(&alice()).unwrap();
        let raw = blob.read("current_user").unwrap().unwrap();
        assert!(raw.contains("\"username\":\"alice\""));
        assert!(!raw.contains("password"));
    }
}
