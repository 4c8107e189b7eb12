//! PostgREST-backed record store.
//!
//! HTTP client for a hosted Postgres table API (Supabase-style PostgREST):
//! equality filters become `?column=eq.value` query pairs, inserts POST a
//! JSON object and ask for the stored representation back, and a unique
//! violation (HTTP 409) surfaces as [`StoreError::Conflict`] so the auth
//! layer can treat the schema's unique index as the authority on
//! username uniqueness.
//!
//! ## Design
//! - Per-request `apikey` + `Authorization: Bearer` headers
//! - 30 second client timeout; retry policy is the caller's concern
//! - No row typing here; rows are plain JSON objects, interpreted above
//!   the [`RecordStore`] seam

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::{Filter, Record, RecordStore};

// ── Configuration ──────────────────────────────────────────────────

/// Connection settings for a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project base URL (e.g., https://xxxx.supabase.co).
    pub url: String,
    /// API key, sent both as `apikey` and as a bearer token.
    pub api_key: String,
}

impl PostgrestConfig {
    /// Load from `LATCHKEY_POSTGREST_URL` / `LATCHKEY_POSTGREST_KEY`.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("LATCHKEY_POSTGREST_URL").ok()?;
        let api_key = std::env::var("LATCHKEY_POSTGREST_KEY").ok()?;

        if url.is_empty() || api_key.is_empty() {
            return None;
        }

        Some(Self { url, api_key })
    }
}

// ── Store client ───────────────────────────────────────────────────

/// [`RecordStore`] implementation over a PostgREST HTTP endpoint.
pub struct PostgrestStore {
    config: PostgrestConfig,
    http: reqwest::Client,
}

impl PostgrestStore {
    /// Create a client for the given endpoint.
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { config, http })
    }

    /// Build the PostgREST URL for a table.
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// Get the base headers for authenticated requests.
    fn auth_headers(&self) -> Vec<(&str, String)> {
        vec![
            ("apikey", self.config.api_key.clone()),
            ("Authorization", format!("Bearer {}", self.config.api_key)),
        ]
    }
}

/// Render a filter as PostgREST query pairs (`column` → `eq.value`).
fn filter_query(filter: &Filter) -> Vec<(String, String)> {
    filter
        .clauses()
        .iter()
        .map(|(column, value)| (column.clone(), format!("eq.{value}")))
        .collect()
}

/// Map a non-success response to a store error, preserving status and body.
async fn response_error(op: &str, resp: reqwest::Response) -> StoreError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if status == reqwest::StatusCode::CONFLICT {
        StoreError::Conflict(format!("{op} conflict ({status}): {body}"))
    } else {
        StoreError::Unavailable(format!("{op} failed ({status}): {body}"))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Malformed(err.to_string())
        } else {
            StoreError::Unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn find(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let mut query = filter_query(filter);
        query.push(("select".into(), "*".into()));

        let mut request = self.http.get(self.table_url(table)).query(&query);
        for (key, value) in self.auth_headers() {
            request = request.header(key, value);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(response_error("find", resp).await);
        }

        Ok(resp.json().await?)
    }

    async fn insert(&self, table: &str, record: Record) -> Result<Record, StoreError> {
        let mut request = self
            .http
            .post(self.table_url(table))
            .json(&record)
            .header("Prefer", "return=representation");
        for (key, value) in self.auth_headers() {
            request = request.header(key, value);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(response_error("insert", resp).await);
        }

        let created: Vec<Record> = resp.json().await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Malformed("insert returned no representation".into()))
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Record) -> Result<(), StoreError> {
        let mut request = self
            .http
            .patch(self.table_url(table))
            .query(&filter_query(filter))
            .json(&patch);
        for (key, value) in self.auth_headers() {
            request = request.header(key, value);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(response_error("update", resp).await);
        }

        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError> {
        let mut request = self
            .http
            .delete(self.table_url(table))
            .query(&filter_query(filter));
        for (key, value) in self.auth_headers() {
            request = request.header(key, value);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(response_error("delete", resp).await);
        }

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────
