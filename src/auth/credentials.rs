//! Credential records and the adapter that stores them.
//!
//! [`CredentialStore`] translates auth intents ("look this username
//! up", "store these credentials") into [`RecordStore`] calls against
//! one logical users table. Uniqueness is ultimately the store schema's
//! job: a conflict reported on insert comes back as
//! [`AuthError::UsernameTaken`] no matter what any earlier lookup said.

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, StoreError};
use crate::store::{Filter, Record, RecordStore};

// ── Data model ─────────────────────────────────────────────────────

/// Stored representation of one registered user.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRecord {
    /// Opaque identifier assigned by the record store on creation.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Login name, unique across all records.
    pub username: String,
    /// Salted one-way hash of the password, never the plaintext.
    pub password_hash: String,
    /// Display name; arbitrary and not unique.
    pub nickname: String,
}

/// Session-facing view of a signed-in user.
///
/// Deliberately has no hash field: stripping the credential hash from
/// the session is structural, not a runtime step that could be missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub nickname: String,
}

impl From<CredentialRecord> for CurrentUser {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            nickname: record.nickname,
        }
    }
}

/// Accept both string ids (uuid/text columns) and numeric ids (bigint
/// identity columns, which PostgREST renders as JSON numbers).
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unsupported id value: {other}"
        ))),
    }
}

impl CredentialRecord {
    fn from_record(record: Record) -> Result<Self, StoreError> {
        serde_json::from_value(serde_json::Value::Object(record))
            .map_err(|e| StoreError::Malformed(format!("users row: {e}")))
    }
}

// ── Store adapter ──────────────────────────────────────────────────

/// Adapter between auth operations and the generic record store.
pub struct CredentialStore<S> {
    store: S,
    table: String,
}

impl<S: RecordStore> CredentialStore<S> {
    /// Wrap `store`, reading and writing the given users table.
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Look up a record by exact, case-sensitive username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, AuthError> {
        let filter = Filter::new().eq("username", username);
        let rows = self.store.find(&self.table, &filter).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(CredentialRecord::from_record(row)?)),
            None => Ok(None),
        }
    }

    /// Insert a new credential record.
    ///
    /// Does not pre-check uniqueness; a store-reported conflict is the
    /// authoritative "taken" signal and maps to
    /// [`AuthError::UsernameTaken`].
    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        nickname: &str,
    ) -> Result<CredentialRecord, AuthError> {
        let mut record = Record::new();
        record.insert("username".into(), username.into());
        record.insert("password_hash".into(), password_hash.into());
        record.insert("nickname".into(), nickname.into());

        match self.store.insert(&self.table, record).await {
            Ok(row) => Ok(CredentialRecord::from_record(row)?),
            Err(StoreError::Conflict(_)) => Err(AuthError::UsernameTaken(username.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn test_credentials() -> (MemoryStore, CredentialStore<MemoryStore>) {
        let store = MemoryStore::new().with_unique_index("users", "username");
        (store.clone(), CredentialStore::new(store, "users"))
    }

    #[tokio::test]
    async fn find_unknown_username_is_none() {
        let (_store, credentials) = test_credentials();
        assert!(credentials.find_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_then_find_roundtrips() {
        let (_store, credentials) = test_credentials();

        let created = credentials.insert("alice", "$argon2id$fake", "Alice A").await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.username, "alice");

        let found = credentials.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$argon2id$fake");
        assert_eq!(found.nickname, "Alice A");
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let (_store, credentials) = test_credentials();

        credentials.insert("Alice", "$argon2id$fake", "Alice A").await.unwrap();
        assert!(credentials.find_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_conflict_is_username_taken() {
        let (_store, credentials) = test_credentials();

        credentials.insert("alice", "$argon2id$one", "First").await.unwrap();
        let result = credentials.insert("alice", "$argon2id$two", "Second").await;
        match result {
            Err(AuthError::UsernameTaken(name)) => assert_eq!(name, "alice"),
            other => panic!("expected UsernameTaken, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn numeric_store_ids_are_stringified() {
        let (store, credentials) = test_credentials();

        let mut row = Record::new();
        row.insert("id".into(), json!(42));
        row.insert("username".into(), json!("alice"));
        row.insert("password_hash".into(), json!("$argon2id$fake"));
        row.insert("nickname".into(), json!("Alice A"));
        store.insert("users", row).await.unwrap();

        let found = credentials.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, "42");
    }

    #[tokio::test]
    async fn row_missing_columns_is_store_unavailable() {
        let (store, credentials) = test_credentials();

        let mut row = Record::new();
        row.insert("username".into(), json!("broken"));
        store.insert("users", row).await.unwrap();

        let result = credentials.find_by_username("broken").await;
        assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
    }

    #[test]
    fn current_user_drops_the_hash() {
        let record = CredentialRecord {
            id: "7".into(),
            username: "alice".into(),
            password_hash: "$argon2id$fake".into(),
            nickname: "Alice A".into(),
        };

        let user = CurrentUser::from(record);
        assert_eq!(user.id, "7");
        assert_eq!(user.username, "alice");
        assert_eq!(user.nickname, "Alice A");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$argon2id$fake"));
    }
}
