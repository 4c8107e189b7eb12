//! In-memory record store for tests and embedded use.
//!
//! Rows live in a `HashMap<table, Vec<Record>>` behind a rwlock; clones
//! share the same underlying data, so a test can keep a handle to the
//! store it handed to the facade and inspect rows afterwards.
//!
//! Unique indexes are declared per table/column at construction. An
//! insert that would duplicate an indexed value fails with
//! [`StoreError::Conflict`] — the same signal a backing database with a
//! unique constraint would produce.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::store::{Filter, Record, RecordStore};

/// In-process [`RecordStore`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Record>>>>,
    unique: Arc<Vec<(String, String)>>,
}

impl MemoryStore {
    /// An empty store with no unique indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unique index on `table.column`.
    ///
    /// Chainable; call once per indexed column before handing the store
    /// out. Existing rows are not re-checked.
    pub fn with_unique_index(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.unique).push((table.into(), column.into()));
        self
    }

    /// Number of rows currently stored in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.tables.read().get(table).map_or(0, Vec::len)
    }

    fn unique_columns<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.unique
            .iter()
            .filter(move |(t, _)| t == table)
            .map(|(_, c)| c.as_str())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read();
        let rows = tables.get(table).map_or(&[][..], Vec::as_slice);
        Ok(rows.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn insert(&self, table: &str, mut record: Record) -> Result<Record, StoreError> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();

        for column in self.unique_columns(table) {
            if let Some(value) = record.get(column) {
                if rows.iter().any(|r| r.get(column) == Some(value)) {
                    return Err(StoreError::Conflict(format!(
                        "duplicate value for unique column '{column}' in table '{table}'"
                    )));
                }
            }
        }

        if !record.contains_key("id") {
            record.insert(
                "id".into(),
                serde_json::Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }

        rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Record) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| !filter.matches(r));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_row(username: &str, nickname: &str) -> Record {
        let mut record = Record::new();
        record.insert("username".into(), json!(username));
        record.insert("nickname".into(), json!(nickname));
        record
    }

    #[tokio::test]
    async fn insert_assigns_id_and_find_matches() {
        let store = MemoryStore::new();

        let stored = store.insert("users", user_row("alice", "Alice A")).await.unwrap();
        assert!(stored.get("id").and_then(|v| v.as_str()).is_some());

        let rows = store
            .find("users", &Filter::new().eq("username", "alice"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("nickname"), Some(&json!("Alice A")));

        let none = store
            .find("users", &Filter::new().eq("username", "bob"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_on_absent_table_is_empty() {
        let store = MemoryStore::new();
        let rows = store.find("nope", &Filter::new()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unique_index_rejects_duplicates() {
        let store = MemoryStore::new().with_unique_index("users", "username");

        store.insert("users", user_row("alice", "Alice A")).await.unwrap();
        let result = store.insert("users", user_row("alice", "Impostor")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));

        // Other tables are unaffected by the index.
        store.insert("posts", user_row("alice", "x")).await.unwrap();
        store.insert("posts", user_row("alice", "y")).await.unwrap();
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.insert("users", user_row("alice", "Alice A")).await.unwrap();
        assert_eq!(handle.row_count("users"), 1);
    }

    #[tokio::test]
    async fn update_patches_matching_rows() {
        let store = MemoryStore::new();
        store.insert("users", user_row("alice", "Alice A")).await.unwrap();
        store.insert("users", user_row("bob", "Bob B")).await.unwrap();

        let mut patch = Record::new();
        patch.insert("nickname".into(), json!("Renamed"));
        store
            .update("users", &Filter::new().eq("username", "alice"), patch)
            .await
            .unwrap();

        let rows = store
            .find("users", &Filter::new().eq("username", "alice"))
            .await
            .unwrap();
        assert_eq!(rows[0].get("nickname"), Some(&json!("Renamed")));

        let rows = store
            .find("users", &Filter::new().eq("username", "bob"))
            .await
            .unwrap();
        assert_eq!(rows[0].get("nickname"), Some(&json!("Bob B")));
    }

    #[tokio::test]
    async fn delete_removes_matching_rows() {
        let store = MemoryStore::new();
        store.insert("users", user_row("alice", "Alice A")).await.unwrap();
        store.insert("users", user_row("bob", "Bob B")).await.unwrap();

        store
            .delete("users", &Filter::new().eq("username", "alice"))
            .await
            .unwrap();
        assert_eq!(store.row_count("users"), 1);

        // Deleting with no match is a no-op.
        store
            .delete("users", &Filter::new().eq("username", "ghost"))
            .await
            .unwrap();
        assert_eq!(store.row_count("users"), 1);
    }
}
