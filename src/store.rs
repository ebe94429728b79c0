//! Date Cache Store
//!
//! Remembers the last-modified date fetched for an entry so repeat visits
//! within the freshness window skip the per-item request. Keys are
//! `{path}:{size}`; entries are overwritten on refetch and never deleted.

pub mod persistence;

use crate::error::StorageError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub use persistence::SledDateCache;

/// Cached last-modified date, stored as JSON `{ "date": ..., "timestamp": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCacheEntry {
    /// Commit date, RFC 3339.
    pub date: String,
    /// When the entry was cached, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl DateCacheEntry {
    pub fn new(date: DateTime<Utc>, cached_at: DateTime<Utc>) -> Self {
        Self {
            date: date.to_rfc3339(),
            timestamp: cached_at.timestamp_millis(),
        }
    }

    /// Whether the entry is younger than `ttl` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.timestamp_millis() - self.timestamp < ttl.num_milliseconds()
    }

    /// The cached date, if it still parses.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

/// Key-value store for cached dates. Last writer wins.
pub trait DateCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<DateCacheEntry>, StorageError>;
    fn put(&self, key: &str, entry: &DateCacheEntry) -> Result<(), StorageError>;
}
