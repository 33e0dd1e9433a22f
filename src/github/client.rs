//! reqwest-backed GitHub REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use super::backoff::RetryConfig;
use super::registry::RepoPath;
use super::types::{ApiErrorBody, ReleaseRecord, ReleaseResponse, RepoResponse, RepoStats};
use super::GitHubApi;
use crate::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const MAX_ERROR_MESSAGE: usize = 200;

#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    timeout: Duration,
    retry: RetryConfig,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid GitHub endpoint {}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let mut attempt = 0;

        loop {
            match self.get_once(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.backoff.delay_for(attempt);
                    tracing::debug!(
                        url = %url,
                        attempt,
                        status = ?e.status_code(),
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying GitHub request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let mut request = self.http.get(url.clone());
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token.expose_secret()));
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Network(e)
        }
    }
}

fn api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.chars().take(MAX_ERROR_MESSAGE).collect());
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("Unknown").to_string()
    } else {
        message
    };
    Error::api(status.as_u16(), message)
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn repo_stats(&self, repo: &RepoPath) -> Result<RepoStats> {
        let path = format!("repos/{}/{}", repo.owner(), repo.repo());
        let response: RepoResponse = self.get_json(&path).await?;
        Ok(response.into())
    }

    async fn releases(&self, repo: &RepoPath) -> Result<Vec<ReleaseRecord>> {
        let path = format!("repos/{}/{}/releases", repo.owner(), repo.repo());
        let response: Vec<ReleaseResponse> = self.get_json(&path).await?;
        Ok(response.into_iter().map(ReleaseRecord::from).collect())
    }
}

pub struct GitHubClientBuilder {
    base_url: String,
    token: Option<SecretString>,
    timeout: Duration,
    retry: RetryConfig,
    user_agent: String,
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GitHubClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Personal access token. Anonymous requests work with a lower rate limit.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn secret_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<GitHubClient> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = self.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid GitHub API URL {}: {}", base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| Error::Config(format!("Invalid user agent: {}", e)))?,
        );

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Network)?;

        Ok(GitHubClient {
            http,
            base_url,
            token: self.token,
            timeout: self.timeout,
            retry: self.retry,
        })
    }
}
