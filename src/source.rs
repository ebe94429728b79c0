//! Content sources
//!
//! The remote content API sits behind `ContentSource` so the fetcher and the
//! date enricher can run against GitHub or an in-memory fixture.

pub mod github;
pub mod memory;

use crate::error::ApiError;
use crate::path::RepoPath;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

pub use github::GithubSource;
pub use memory::{Canned, MemorySource};

/// Read-only access to a repository's contents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// `GET {api_base}/{path}`: a JSON array for directories, an object for files.
    async fn contents(&self, path: &RepoPath) -> Result<Value, ApiError>;

    /// Commit metadata for the latest commit touching `path` on the
    /// configured branch.
    async fn last_commit(&self, path: &str) -> Result<Value, ApiError>;

    /// URL the primary request for `path` goes to, for logs and `resolve`.
    fn contents_url(&self, path: &RepoPath) -> String;
}

/// Extract `commit.committer.date` from a commits response.
///
/// Accepts either a commit object or an array of them (first wins).
pub fn commit_date(value: &Value) -> Result<DateTime<Utc>, ApiError> {
    let commit = match value {
        Value::Array(items) => items.first().ok_or_else(|| {
            ApiError::UnexpectedShape("no commits recorded for path".to_string())
        })?,
        other => other,
    };

    let raw = commit
        .pointer("/commit/committer/date")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ApiError::UnexpectedShape("commit.committer.date missing".to_string())
        })?;

    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ApiError::UnexpectedShape(format!("bad commit date '{}': {}", raw, e)))
}
