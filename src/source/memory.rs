//! In-memory content source.
//!
//! Serves canned API responses from a fixture. Used for offline browsing with
//! `--fixture` and by the tests.

use crate::error::ApiError;
use crate::path::RepoPath;
use crate::source::ContentSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// A canned response for one request.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Canned {
    /// Non-success HTTP status.
    Status { status: u16 },
    /// Transport failure.
    Network { network_error: String },
    /// Successful JSON body.
    Json(Value),
}

impl Canned {
    fn respond(&self, url: String) -> Result<Value, ApiError> {
        match self {
            Canned::Json(value) => Ok(value.clone()),
            Canned::Status { status } => Err(ApiError::HttpStatus {
                status: *status,
                url,
            }),
            Canned::Network { network_error } => Err(ApiError::Network(network_error.clone())),
        }
    }
}

/// Fixture file layout: responses keyed by repository path.
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    contents: HashMap<String, Canned>,
    #[serde(default)]
    commits: HashMap<String, Canned>,
}

/// `ContentSource` answering from in-memory tables. Unknown paths get a 404.
#[derive(Default)]
pub struct MemorySource {
    contents: RwLock<HashMap<String, Canned>>,
    commits: RwLock<HashMap<String, Canned>>,
    requests: RwLock<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON fixture with `contents` and `commits` maps.
    pub fn from_fixture_file(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read fixture {}: {}", path.display(), e))
        })?;
        let fixture: Fixture = serde_json::from_str(&raw).map_err(|e| {
            ApiError::ConfigError(format!("Failed to parse fixture {}: {}", path.display(), e))
        })?;
        Ok(Self {
            contents: RwLock::new(fixture.contents),
            commits: RwLock::new(fixture.commits),
            requests: RwLock::new(Vec::new()),
        })
    }

    pub fn set_contents(&self, path: &str, response: Canned) {
        self.contents.write().insert(path.to_string(), response);
    }

    pub fn set_commit(&self, path: &str, response: Canned) {
        self.commits.write().insert(path.to_string(), response);
    }

    /// Requests served so far, as `contents:<path>` or `commits:<path>`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().clone()
    }

    pub fn commit_requests(&self) -> usize {
        self.requests
            .read()
            .iter()
            .filter(|r| r.starts_with("commits:"))
            .count()
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn contents(&self, path: &RepoPath) -> Result<Value, ApiError> {
        self.requests.write().push(format!("contents:{}", path));
        let url = self.contents_url(path);
        match self.contents.read().get(path.as_str()) {
            Some(canned) => canned.respond(url),
            None => Err(ApiError::HttpStatus { status: 404, url }),
        }
    }

    async fn last_commit(&self, path: &str) -> Result<Value, ApiError> {
        self.requests.write().push(format!("commits:{}", path));
        let url = format!("memory://commits?path={}", path);
        match self.commits.read().get(path) {
            Some(canned) => canned.respond(url),
            None => Err(ApiError::HttpStatus { status: 404, url }),
        }
    }

    fn contents_url(&self, path: &RepoPath) -> String {
        format!("memory://contents/{}", path)
    }
}
