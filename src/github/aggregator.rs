//! Per-plugin stats bundles and the merged release feed.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use super::GitHubApi;
use super::registry::{RepoPath, RepoRegistry};
use super::types::{FeedRelease, PluginStatsBundle};
use crate::common::TtlCache;

/// Fetches and caches [`PluginStatsBundle`]s for a [`RepoRegistry`].
///
/// Remote failures never propagate: each sub-fetch degrades to an empty
/// field and the failure is logged. Only fully successful bundles are cached.
#[derive(Clone)]
pub struct StatsAggregator {
    api: Arc<dyn GitHubApi>,
    registry: Arc<RepoRegistry>,
    cache: TtlCache<String, PluginStatsBundle>,
}

impl std::fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsAggregator")
            .field("registry", &self.registry)
            .field("ttl", &self.cache.ttl())
            .finish_non_exhaustive()
    }
}

impl StatsAggregator {
    pub fn new(api: Arc<dyn GitHubApi>, registry: RepoRegistry) -> Self {
        Self {
            api,
            registry: Arc::new(registry),
            cache: TtlCache::default(),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = TtlCache::new(ttl);
        self
    }

    pub fn registry(&self) -> &RepoRegistry {
        &self.registry
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    pub fn repo_path(&self, owner: &str) -> Option<&str> {
        self.registry.repo_path(owner)
    }

    pub async fn fetch_stats_bundle(&self, owner: &str) -> PluginStatsBundle {
        let Some(repo) = self.registry.repo(owner) else {
            tracing::debug!(owner, "No repository registered");
            return PluginStatsBundle::unknown(owner);
        };

        if let Some(bundle) = self.cache.get(&owner.to_string()).await {
            tracing::trace!(owner, "Stats cache hit");
            return bundle;
        }

        let (bundle, complete) = self.fetch_uncached(owner, repo).await;
        if complete {
            self.cache.insert(owner.to_string(), bundle.clone()).await;
        }
        bundle
    }

    async fn fetch_uncached(&self, owner: &str, repo: &RepoPath) -> (PluginStatsBundle, bool) {
        let (stats, releases) = tokio::join!(self.api.repo_stats(repo), self.api.releases(repo));

        let mut complete = true;
        let stats = stats
            .inspect_err(|e| {
                complete = false;
                tracing::warn!(
                    owner,
                    repo = %repo,
                    status = ?e.status_code(),
                    error = %e,
                    "Failed to fetch repository stats"
                );
            })
            .ok();
        let releases = releases.unwrap_or_else(|e| {
            complete = false;
            tracing::warn!(
                owner,
                repo = %repo,
                status = ?e.status_code(),
                error = %e,
                "Failed to fetch releases"
            );
            Vec::new()
        });

        let bundle = PluginStatsBundle::new(repo.as_str(), stats, releases);
        tracing::debug!(
            owner,
            releases = bundle.releases.len(),
            total_downloads = bundle.total_downloads,
            complete,
            "Fetched stats bundle"
        );
        (bundle, complete)
    }

    /// Bundles for every registered owner, fetched concurrently.
    pub async fn fetch_all_stats_bundles(&self) -> BTreeMap<String, PluginStatsBundle> {
        let owners: Vec<&str> = self.registry.ids().collect();
        let bundles = join_all(owners.iter().map(|owner| self.fetch_stats_bundle(owner))).await;

        owners
            .into_iter()
            .map(str::to_string)
            .zip(bundles)
            .collect()
    }

    /// Every owner's releases, newest first.
    ///
    /// Releases without a publish time sort last. Equal times keep registry
    /// order, then the API's order within an owner.
    pub async fn fetch_merged_release_feed(&self) -> Vec<FeedRelease> {
        let owners: Vec<&str> = self.registry.ids().collect();
        let bundles = join_all(owners.iter().map(|owner| self.fetch_stats_bundle(owner))).await;

        let mut feed: Vec<FeedRelease> = owners
            .into_iter()
            .zip(bundles)
            .flat_map(|(owner, bundle)| {
                let name = self.registry.display_name(owner).to_string();
                bundle.releases.into_iter().map(move |release| FeedRelease {
                    release,
                    plugin_id: owner.to_string(),
                    plugin_name: name.clone(),
                })
            })
            .collect();

        feed.sort_by(|a, b| {
            match (a.release.published_at, b.release.published_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        feed
    }

    pub async fn invalidate(&self, owner: &str) {
        self.cache.invalidate(&owner.to_string()).await;
    }

    pub async fn invalidate_all(&self) {
        self.cache.clear().await;
    }
}
