//! Account and session operations behind one typed entry point.
//!
//! Provides:
//! - [`Auth::sign_up`]: validate, hash, store, open a session
//! - [`Auth::sign_in`]: verify credentials, open a session
//! - [`Auth::sign_out`]: drop the session
//! - [`Auth::current_user`]: whoever the session says is signed in
//!
//! ## Design Decisions
//!
//! - **One failure story for bad logins.** Unknown username and wrong
//!   password produce the same [`AuthError::InvalidCredentials`] value,
//!   and the unknown-username path still runs a hash verification so
//!   the two cases cost about the same.
//! - **The store decides uniqueness.** Sign-up does a friendly
//!   pre-check so the common duplicate gets a fast answer, but the
//!   insert's conflict result is what actually guards the invariant.
//! - **Sessions hold no secrets.** Only the [`CurrentUser`] projection
//!   is ever written to the session blob.

use crate::auth::credentials::{CredentialStore, CurrentUser};
use crate::auth::password;
use crate::auth::session::SessionManager;
use crate::blob::BlobStore;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::store::RecordStore;

/// Facade over credential storage and session persistence.
pub struct Auth<S, B> {
    credentials: CredentialStore<S>,
    session: SessionManager<B>,
    config: AuthConfig,
}

impl<S: RecordStore, B: BlobStore> Auth<S, B> {
    /// Build a facade from a record store, a blob store, and config.
    pub fn new(store: S, blob: B, config: AuthConfig) -> Self {
        Self {
            credentials: CredentialStore::new(store, config.users_table.clone()),
            session: SessionManager::new(blob, config.session_key.clone()),
            config,
        }
    }

    /// Register a new account and sign it in.
    ///
    /// Username and nickname are trimmed before any other check; the
    /// password is used exactly as given.
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        nickname: &str,
    ) -> Result<CurrentUser, AuthError> {
        let username = username.trim();
        let nickname = nickname.trim();

        if username.is_empty() {
            return Err(AuthError::InvalidInput("username"));
        }
        if password.trim().is_empty() {
            return Err(AuthError::InvalidInput("password"));
        }
        if nickname.is_empty() {
            return Err(AuthError::InvalidInput("nickname"));
        }
        if password.chars().count() < self.config.min_password_len {
            return Err(AuthError::WeakPassword {
                min: self.config.min_password_len,
            });
        }

        // Friendly early answer; the insert below is what actually
        // enforces uniqueness.
        if self.credentials.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let hash = password::hash_password(password)?;
        let record = self.credentials.insert(username, &hash, nickname).await?;

        let user = CurrentUser::from(record);
        self.session.set(&user)?;
        tracing::info!(username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and open a session for the matching user.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let username = username.trim();

        if username.is_empty() {
            return Err(AuthError::InvalidInput("username"));
        }
        if password.trim().is_empty() {
            return Err(AuthError::InvalidInput("password"));
        }

        let record = match self.credentials.find_by_username(username).await? {
            Some(record) => record,
            None => {
                // Burn a verification anyway so unknown usernames cost
                // about the same as wrong passwords.
                let _ = password::verify_password(password, password::decoy_hash());
                tracing::debug!(username = username, "Sign-in rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !password::verify_password(password, &record.password_hash)? {
            tracing::debug!(username = username, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let user = CurrentUser::from(record);
        self.session.set(&user)?;
        tracing::info!(username = %user.username, "User signed in");
        Ok(user)
    }

    /// End the current session. Succeeds when nobody is signed in.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        tracing::info!("User signed out");
        Ok(())
    }

    /// The signed-in user according to the session, if any.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.session.get()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
