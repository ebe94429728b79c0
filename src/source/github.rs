//! GitHub content API client.

use crate::config::{HttpConfig, RepositoryConfig};
use crate::error::ApiError;
use crate::path::RepoPath;
use crate::source::ContentSource;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// `ContentSource` backed by the GitHub REST API.
pub struct GithubSource {
    client: Client,
    api_base: Url,
    commits_base: Url,
    branch: String,
}

impl GithubSource {
    pub fn new(repository: &RepositoryConfig, http: &HttpConfig) -> Result<Self, ApiError> {
        let api_base = Url::parse(&repository.api_base).map_err(|e| {
            ApiError::ConfigError(format!("Invalid api_base '{}': {}", repository.api_base, e))
        })?;
        let commits_base = Url::parse(&repository.commits_base).map_err(|e| {
            ApiError::ConfigError(format!(
                "Invalid commits_base '{}': {}",
                repository.commits_base, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&http.user_agent)
                .map_err(|e| ApiError::ConfigError(format!("Invalid user_agent: {}", e)))?,
        );
        if let Some(token) = http.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::ConfigError(format!("Invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base,
            commits_base,
            branch: repository.branch.clone(),
        })
    }

    fn contents_endpoint(&self, path: &RepoPath) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.segments());
        }
        url
    }

    fn commits_endpoint(&self, path: &str) -> Url {
        let mut url = self.commits_base.clone();
        url.query_pairs_mut()
            .append_pair("path", path)
            .append_pair("sha", &self.branch)
            .append_pair("per_page", "1");
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "API response");
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl ContentSource for GithubSource {
    async fn contents(&self, path: &RepoPath) -> Result<Value, ApiError> {
        self.get_json(self.contents_endpoint(path)).await
    }

    async fn last_commit(&self, path: &str) -> Result<Value, ApiError> {
        self.get_json(self.commits_endpoint(path)).await
    }

    fn contents_url(&self, path: &RepoPath) -> String {
        self.contents_endpoint(path).to_string()
    }
}
