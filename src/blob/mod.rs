//! Blob store abstraction: small key/value persistence for the session.
//!
//! The client-side analog of browser local storage: one string value per
//! key, surviving process restarts. The session manager is the only
//! consumer in this crate and uses a single fixed key.
//!
//! Contract, for implementors:
//! - `read` of an absent key is `Ok(None)`, not an error
//! - `write` replaces atomically; a crash mid-write must leave either
//!   the old value or the new one, never a torn blob
//! - `remove` of an absent key succeeds

use crate::error::StoreError;

pub mod file;
pub mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Key/value persistence for small string blobs.
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
