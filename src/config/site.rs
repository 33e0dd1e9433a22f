//! Settings for the site services.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use super::provider::{ConfigProvider, ConfigProviderExt};
use super::{ConfigBuilder, ConfigError, ConfigResult};
use crate::common::DEFAULT_TTL;
use crate::github::{DEFAULT_API_URL, DEFAULT_TIMEOUT, RetryConfig};

pub const CONTENT_ROOT_KEY: &str = "site.content.root";
pub const NAVIGATION_FILE_KEY: &str = "site.navigation.file";
pub const GITHUB_TOKEN_KEY: &str = "github.token";
pub const GITHUB_API_URL_KEY: &str = "site.github.api.url";
pub const STATS_TTL_KEY: &str = "site.stats.ttl.secs";
pub const HTTP_TIMEOUT_KEY: &str = "site.http.timeout.secs";
pub const MAX_RETRIES_KEY: &str = "site.http.max.retries";

pub const DEFAULT_CONTENT_ROOT: &str = "content/wiki";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory holding one sub-directory of MDX files per owner.
    pub content_root: PathBuf,
    /// Navigation trees to load instead of the builtin ones.
    pub navigation_file: Option<PathBuf>,
    pub github_token: Option<SecretString>,
    pub github_api_url: String,
    /// Zero disables stats caching.
    pub stats_ttl: Duration,
    pub http_timeout: Duration,
    pub max_retries: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            navigation_file: None,
            github_token: None,
            github_api_url: DEFAULT_API_URL.to_string(),
            stats_ttl: DEFAULT_TTL,
            http_timeout: DEFAULT_TIMEOUT,
            max_retries: RetryConfig::default().max_retries,
        }
    }
}

impl SiteConfig {
    pub async fn load<P: ConfigProvider + ?Sized>(provider: &P) -> ConfigResult<Self> {
        let defaults = Self::default();

        let content_root = provider
            .get::<String>(CONTENT_ROOT_KEY)
            .await?
            .map(PathBuf::from)
            .unwrap_or(defaults.content_root);
        let navigation_file = provider
            .get::<String>(NAVIGATION_FILE_KEY)
            .await?
            .map(PathBuf::from);
        let github_token = provider
            .get::<String>(GITHUB_TOKEN_KEY)
            .await?
            .map(SecretString::from);

        let github_api_url = provider
            .get_or(GITHUB_API_URL_KEY, defaults.github_api_url)
            .await?;
        Url::parse(&github_api_url).map_err(|e| ConfigError::InvalidValue {
            key: GITHUB_API_URL_KEY.to_string(),
            message: e.to_string(),
        })?;

        let stats_ttl = provider
            .get::<u64>(STATS_TTL_KEY)
            .await?
            .map(Duration::from_secs)
            .unwrap_or(defaults.stats_ttl);

        let http_timeout = match provider.get::<u64>(HTTP_TIMEOUT_KEY).await? {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    key: HTTP_TIMEOUT_KEY.to_string(),
                    message: "timeout must be at least one second".to_string(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.http_timeout,
        };

        let max_retries = provider.get_or(MAX_RETRIES_KEY, defaults.max_retries).await?;

        let config = Self {
            content_root,
            navigation_file,
            github_token,
            github_api_url,
            stats_ttl,
            http_timeout,
            max_retries,
        };
        tracing::debug!(
            provider = provider.name(),
            content_root = %config.content_root.display(),
            authenticated = config.github_token.is_some(),
            "Loaded site configuration"
        );
        Ok(config)
    }

    /// Settings from unprefixed environment variables (`SITE_CONTENT_ROOT`,
    /// `GITHUB_TOKEN`, ...).
    pub async fn from_env() -> ConfigResult<Self> {
        let provider = ConfigBuilder::new().env().build();
        Self::load(&provider).await
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::default().with_max_retries(self.max_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigProvider;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_defaults() {
        let config = SiteConfig::load(&MemoryConfigProvider::new()).await.unwrap();
        assert_eq!(config.content_root, PathBuf::from("content/wiki"));
        assert!(config.navigation_file.is_none());
        assert!(config.github_token.is_none());
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.stats_ttl, Duration::from_secs(300));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 2);
    }

    #[tokio::test]
    async fn test_overrides() {
        let provider = MemoryConfigProvider::new()
            .value(CONTENT_ROOT_KEY, "/srv/wiki")
            .value(NAVIGATION_FILE_KEY, "nav.yaml")
            .value(GITHUB_TOKEN_KEY, "ghp_abc")
            .value(GITHUB_API_URL_KEY, "http://localhost:9000")
            .value(STATS_TTL_KEY, "0")
            .value(HTTP_TIMEOUT_KEY, "3")
            .value(MAX_RETRIES_KEY, "0");

        let config = SiteConfig::load(&provider).await.unwrap();
        assert_eq!(config.content_root, PathBuf::from("/srv/wiki"));
        assert_eq!(config.navigation_file, Some(PathBuf::from("nav.yaml")));
        assert_eq!(
            config.github_token.as_ref().map(|t| t.expose_secret()),
            Some("ghp_abc")
        );
        assert_eq!(config.github_api_url, "http://localhost:9000");
        assert!(config.stats_ttl.is_zero());
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.retry_config().max_retries, 0);
    }

    #[tokio::test]
    async fn test_invalid_values() {
        let provider = MemoryConfigProvider::new().value(HTTP_TIMEOUT_KEY, "0");
        let err = SiteConfig::load(&provider).await.unwrap_err();
        assert!(err.to_string().contains(HTTP_TIMEOUT_KEY));

        let provider = MemoryConfigProvider::new().value(STATS_TTL_KEY, "five minutes");
        assert!(SiteConfig::load(&provider).await.is_err());

        let provider = MemoryConfigProvider::new().value(GITHUB_API_URL_KEY, "not a url");
        assert!(matches!(
            SiteConfig::load(&provider).await,
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = SiteConfig {
            github_token: Some(SecretString::from("ghp_hidden".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("ghp_hidden"));
    }
}
