//! Client-side authentication core: accounts, sign-in, and a persisted
//! current-user session.
//!
//! Provides:
//! - [`Auth`]: sign-up, sign-in, sign-out, current-user
//! - [`RecordStore`]: generic table-shaped storage with an in-memory
//!   implementation and a PostgREST-backed one
//! - [`BlobStore`]: small keyed string storage for the session, in
//!   memory or on disk
//!
//! ## Design Decisions
//! - The facade is generic over both storage seams, so tests run
//!   entirely in memory while production points at PostgREST and a
//!   session file.
//! - Credential hashes never cross the session boundary; the session
//!   type simply has no field for them.
//!
//! ```
//! use latchkey::{Auth, AuthConfig, MemoryBlobStore, MemoryStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), latchkey::AuthError> {
//! let store = MemoryStore::new().with_unique_index("users", "username");
//! let auth = Auth::new(store, MemoryBlobStore::new(), AuthConfig::default());
//!
//! let user = auth.sign_up("alice", "secret1", "Alice A").await?;
//! assert_eq!(auth.current_user(), Some(user));
//! auth.sign_out()?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod blob;
pub mod config;
pub mod error;
pub mod store;

pub use auth::{Auth, CredentialRecord, CredentialStore, CurrentUser, SessionManager};
pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use config::AuthConfig;
pub use error::{AuthError, StoreError};
pub use store::{Filter, MemoryStore, PostgrestConfig, PostgrestStore, Record, RecordStore};
