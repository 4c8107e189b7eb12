//! Username/password authentication with a persisted session.
//!
//! Provides:
//! - Account registration and credential verification (argon2 hashes)
//! - A single current-user session written through a [`BlobStore`]
//! - [`Auth`], the facade applications talk to
//!
//! ## Design Decisions
//! - Password hashing uses `argon2` with per-user random salts; the
//!   PHC string in the store carries its own parameters, so hashes
//!   survive future parameter changes.
//! - Failed sign-ins collapse to one `InvalidCredentials` error so
//!   callers cannot tell "no such user" from "wrong password".
//! - Credential storage and session storage are separate trait seams
//!   ([`RecordStore`], [`BlobStore`]); the facade is generic over both.
//!
//! [`BlobStore`]: crate::blob::BlobStore
//! [`RecordStore`]: crate::store::RecordStore

pub mod credentials;
pub mod facade;
pub(crate) mod password;
pub mod session;

pub use credentials::{CredentialRecord, CredentialStore, CurrentUser};
pub use facade::Auth;
pub use session::SessionManager;
