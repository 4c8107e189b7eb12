//! Configuration for the auth core.
//!
//! One plain struct injected by the embedding application. There is no
//! config file; hosts construct an [`AuthConfig`] (usually just
//! `AuthConfig::default()`) and hand it to `Auth::new`.

/// Tunables for the auth facade.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Minimum password length in characters, checked at sign-up.
    pub min_password_len: usize,
    /// Logical table holding credential records.
    pub users_table: String,
    /// Blob-store key under which the session is persisted.
    pub session_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_len: 6,
            users_table: "users".into(),
            session_key: "current_user".into(),
        }
    }
}

impl AuthConfig {
    /// Override the minimum password length.
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Override the credential table name.
    pub fn with_users_table(mut self, table: impl Into<String>) -> Self {
        self.users_table = table.into();
        self
    }

    /// Override the session blob key.
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }
}
