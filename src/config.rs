//! Configuration
//!
//! Layered configuration: built-in defaults, then the user config file, then
//! an explicit `--config` file, then `REPOBROWSE_*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_REPOSITORY: &str =
    "https://api.github.com/repos/wpetersen-hypercraft/wpetersen-hypercraft.github.io";

/// Complete browser configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which repository to browse and where browsing starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Content API base; the repository path is appended to it.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Commits API endpoint used for last-modified dates.
    #[serde(default = "default_commits_base")]
    pub commits_base: String,
    /// Mandatory root prefix; browsing never leaves it. Empty means repository root.
    #[serde(default = "default_root")]
    pub root: String,
    /// Branch whose history dates come from.
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_api_base() -> String {
    format!("{}/contents", DEFAULT_REPOSITORY)
}

fn default_commits_base() -> String {
    format!("{}/commits", DEFAULT_REPOSITORY)
}

fn default_root() -> String {
    "contents".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            commits_base: default_commits_base(),
            root: default_root(),
            branch: default_branch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Bearer token; raises the API rate limit when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user_agent() -> String {
    format!("repobrowse/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Last-modified date cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Freshness window in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Database directory; None means the platform cache directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_ttl_hours() -> u64 {
    24
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            ttl_hours: default_ttl_hours(),
            path: None,
        }
    }
}

impl CacheConfig {
    /// Resolve the database directory.
    pub fn resolve_path(&self) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => Ok(xdg::cache_home()?.join("repobrowse").join("dates")),
        }
    }
}

fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl BrowseConfig {
    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !has_http_scheme(&self.repository.api_base) {
            return Err(ApiError::ConfigError(format!(
                "Invalid api_base URL: {}",
                self.repository.api_base
            )));
        }
        if !has_http_scheme(&self.repository.commits_base) {
            return Err(ApiError::ConfigError(format!(
                "Invalid commits_base URL: {}",
                self.repository.commits_base
            )));
        }
        if self.repository.branch.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "Branch name cannot be empty".to_string(),
            ));
        }
        if self.cache.ttl_hours == 0 {
            return Err(ApiError::ConfigError(
                "cache.ttl_hours must be positive".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "http.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
