//! GitHub contents API store.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::{ContentStore, StoredFile};
use crate::error::{Error, Result};

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Connection settings for a repository.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch that receives commits
    pub branch: String,
    /// Access token with write permission on the repository
    pub token: String,
    /// API root, overridable for enterprise hosts
    pub api_url: String,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl GithubConfig {
    /// Create a config for `owner/repo` on the `main` branch.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: "main".to_string(),
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: "arxiu-proxy".to_string(),
        }
    }

    /// Set the branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the API root.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, self.owner, self.repo, path
        )
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutRequest<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Store backed by a GitHub repository.
pub struct GithubStore {
    config: GithubConfig,
    client: Client,
}

impl GithubStore {
    /// Create a store with a fresh HTTP client.
    pub fn new(config: GithubConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a store sharing an existing HTTP client.
    pub fn with_client(config: GithubConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Get the repository settings.
    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, &self.config.user_agent)
    }
}

/// Turn a non-success response into an error carrying its status.
async fn remote_error(response: Response, path: &str) -> Error {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("request for {} failed", path));

    match status {
        404 => Error::NotFound(path.to_string()),
        409 => Error::Conflict(path.to_string()),
        _ => Error::Remote { status, message },
    }
}

impl ContentStore for GithubStore {
    async fn get_file(&self, path: &str) -> Result<StoredFile> {
        let request = self
            .client
            .get(self.config.contents_url(path))
            .query(&[("ref", self.config.branch.as_str())]);
        let response = self.authorized(request).send().await?;

        if !response.status().is_success() {
            return Err(remote_error(response, path).await);
        }

        let body: ContentsResponse = response.json().await?;
        log::debug!("Fetched {} at {}", path, body.sha);
        Ok(StoredFile {
            // The API wraps base64 content at 60 columns
            content_base64: body.content.replace(['\n', '\r'], ""),
            sha: body.sha,
        })
    }

    async fn put_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<String> {
        let payload = PutRequest {
            message,
            content: content_base64,
            branch: &self.config.branch,
            sha,
        };
        let request = self.client.put(self.config.contents_url(path)).json(&payload);
        let response = self.authorized(request).send().await?;

        if !response.status().is_success() {
            return Err(remote_error(response, path).await);
        }

        let body: PutResponse = response.json().await?;
        log::info!("Committed {}: {}", path, message);
        Ok(body.content.sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_url() {
        let config = GithubConfig::new("someone", "arxiu", "token")
            .with_api_url("https://example.test/api/");
        assert_eq!(
            config.contents_url("data/a.pdf"),
            "https://example.test/api/repos/someone/arxiu/contents/data/a.pdf"
        );
        assert_eq!(config.branch, "main");
    }

    #[test]
    fn test_put_request_omits_missing_sha() {
        let payload = PutRequest {
            message: "upload: a.pdf",
            content: "JVBERg==",
            branch: "main",
            sha: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("sha").is_none());
        assert_eq!(json["branch"], "main");
    }
}
