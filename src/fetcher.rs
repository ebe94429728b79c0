//! Directory Fetcher
//!
//! Issues the primary request for a path and classifies the response as a
//! directory listing or a single file.

use crate::error::ApiError;
use crate::path::RepoPath;
use crate::source::ContentSource;
use crate::types::{Entry, EntryKind, Fetched, Listing, SingleFile};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DirectoryFetcher {
    source: Arc<dyn ContentSource>,
}

impl DirectoryFetcher {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    /// Fetch `path` and decide whether it is a listing or a file.
    pub async fn fetch(&self, path: &RepoPath) -> Result<Fetched, ApiError> {
        let url = self.source.contents_url(path);
        info!(url = %url, "Fetching files");
        let value = match self.source.contents(path).await {
            Ok(value) => value,
            Err(e) => {
                warn!(url = %url, error = %e, "Primary fetch failed");
                return Err(e);
            }
        };
        let fetched = classify(value)?;
        match &fetched {
            Fetched::Listing(listing) => debug!(entries = listing.len(), "Received listing"),
            Fetched::File(file) => {
                info!(download_url = %file.download_url, "Path is a file, redirecting")
            }
        }
        Ok(fetched)
    }
}

/// Interpret a contents response.
pub fn classify(value: Value) -> Result<Fetched, ApiError> {
    match value {
        Value::Array(_) => {
            let entries: Vec<Entry> = serde_json::from_value(value)
                .map_err(|e| ApiError::UnexpectedShape(format!("bad listing entry: {}", e)))?;
            Ok(Fetched::Listing(Listing::new(entries)))
        }
        Value::Object(_) => {
            let entry: Entry = serde_json::from_value(value)
                .map_err(|e| ApiError::UnexpectedShape(format!("bad content object: {}", e)))?;
            if entry.kind != EntryKind::File {
                return Err(ApiError::UnexpectedShape(format!(
                    "object of type {:?} is not a file",
                    entry.kind
                )));
            }
            let download_url = entry.download_url.ok_or_else(|| {
                ApiError::UnexpectedShape(format!("file {} has no download_url", entry.path))
            })?;
            Ok(Fetched::File(SingleFile {
                name: entry.name,
                path: entry.path,
                size: entry.size,
                download_url,
            }))
        }
        other => Err(ApiError::UnexpectedShape(format!(
            "expected array or object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
