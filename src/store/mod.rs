//! Record store abstraction — the CRUD collaborator behind the auth core.
//!
//! The core never talks to a database directly. It consumes the
//! [`RecordStore`] trait: find/insert/update/delete against named tables
//! with equality filters, rows as plain JSON objects. Two implementations
//! ship with the crate:
//!
//! - [`PostgrestStore`]: HTTP client for a hosted Postgres table API
//! - [`MemoryStore`]: in-process store for tests and embedded use
//!
//! Credential semantics (username uniqueness, hash handling) live above
//! this seam; implementations only report a [`StoreError::Conflict`] when
//! an insert violates a unique index.

use async_trait::async_trait;

use crate::error::StoreError;

pub mod memory;
pub mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::{PostgrestConfig, PostgrestStore};

// ── Rows and filters ───────────────────────────────────────────────

/// A single stored row: a JSON object keyed by column name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Conjunction of column-equals-value clauses.
///
/// Equality is the only predicate the core needs; richer queries are a
/// concern of the backing store, not of this crate.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// An empty filter, matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `column = value` clause.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((column.into(), value.into()));
        self
    }

    /// The accumulated clauses, in insertion order.
    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    /// Whether a record satisfies every clause.
    ///
    /// String columns compare by value; non-string columns (numeric ids
    /// and the like) compare against their JSON rendering.
    pub fn matches(&self, record: &Record) -> bool {
        self.clauses.iter().all(|(column, value)| {
            match record.get(column) {
                Some(serde_json::Value::String(s)) => s == value,
                Some(other) => other.to_string() == *value,
                None => false,
            }
        })
    }
}

// ── Store trait ────────────────────────────────────────────────────

/// External CRUD data service holding the credential records.
///
/// Implementations are interchangeable behind this trait; the auth layer
/// is written against it and never against a concrete store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every record in `table` matching `filter`.
    async fn find(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError>;

    /// Insert a record and return it as stored (with any store-assigned
    /// columns such as `id` filled in).
    ///
    /// A unique-index violation is reported as [`StoreError::Conflict`];
    /// that signal is authoritative for username uniqueness.
    async fn insert(&self, table: &str, record: Record) -> Result<Record, StoreError>;

    /// Apply `patch` to every record matching `filter`.
    async fn update(&self, table: &str, filter: &Filter, patch: Record) -> Result<(), StoreError>;

    /// Delete every record matching `filter`.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, serde_json::Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let row = record(&[("username", json!("alice"))]);
        assert!(Filter::new().matches(&row));
    }

    #[test]
    fn filter_matches_string_columns() {
        let row = record(&[("username", json!("alice")), ("nickname", json!("Alice A"))]);
        assert!(Filter::new().eq("username", "alice").matches(&row));
        assert!(!Filter::new().eq("username", "bob").matches(&row));
        assert!(Filter::new()
            .eq("username", "alice")
            .eq("nickname", "Alice A")
            .matches(&row));
        assert!(!Filter::new()
            .eq("username", "alice")
            .eq("nickname", "Bob")
            .matches(&row));
    }

    #[test]
    fn filter_matches_numeric_columns_by_rendering() {
        let row = record(&[("id", json!(42))]);
        assert!(Filter::new().eq("id", "42").matches(&row));
        assert!(!Filter::new().eq("id", "43").matches(&row));
    }

    #[test]
    fn filter_misses_absent_column() {
        let row = record(&[("username", json!("alice"))]);
        assert!(!Filter::new().eq("nickname", "anything").matches(&row));
    }
}
