use std::sync::Arc;

use crate::config::{ConfigProvider, SiteConfig};
use crate::content::ContentStore;
use crate::github::{GitHubApi, GitHubClient, RepoRegistry, StatsAggregator};
use crate::navigation::NavigationIndex;
use crate::Result;

/// The wiki content store, navigation index and stats aggregator, wired from
/// one [`SiteConfig`].
#[derive(Debug, Clone)]
pub struct Site {
    content: ContentStore,
    navigation: Arc<NavigationIndex>,
    stats: StatsAggregator,
}

impl Site {
    pub fn new(content: ContentStore, navigation: NavigationIndex, stats: StatsAggregator) -> Self {
        Self {
            content,
            navigation: Arc::new(navigation),
            stats,
        }
    }

    pub async fn from_env() -> Result<Self> {
        let config = SiteConfig::from_env().await?;
        Self::from_site_config(config).await
    }

    pub async fn from_config<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let config = SiteConfig::load(provider).await?;
        Self::from_site_config(config).await
    }

    pub async fn from_site_config(config: SiteConfig) -> Result<Self> {
        let client = GitHubClient::builder()
            .base_url(config.github_api_url.as_str())
            .secret_token(config.github_token.clone())
            .timeout(config.http_timeout)
            .retry(config.retry_config())
            .build()?;
        Self::with_api(config, Arc::new(client)).await
    }

    /// Like [`from_site_config`](Self::from_site_config) with a caller-supplied
    /// GitHub backend.
    pub async fn with_api(config: SiteConfig, api: Arc<dyn GitHubApi>) -> Result<Self> {
        let navigation = match &config.navigation_file {
            Some(path) => NavigationIndex::from_file(path).await?,
            None => NavigationIndex::builtin(),
        };
        let stats = StatsAggregator::new(api, RepoRegistry::builtin())
            .with_cache_ttl(config.stats_ttl);

        tracing::info!(
            content_root = %config.content_root.display(),
            owners = navigation.owners().count(),
            repos = stats.registry().len(),
            "Site initialized"
        );
        Ok(Self::new(
            ContentStore::new(config.content_root),
            navigation,
            stats,
        ))
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn navigation(&self) -> &NavigationIndex {
        &self.navigation
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }
}
