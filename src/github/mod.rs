//! GitHub repository stats and releases for registered plugins.
//!
//! [`GitHubClient`] talks to the REST API; [`StatsAggregator`] combines its
//! results into cached [`PluginStatsBundle`]s and a merged release feed.

mod aggregator;
mod backoff;
mod client;
mod registry;
mod types;

use async_trait::async_trait;

use crate::Result;

pub use aggregator::StatsAggregator;
pub use backoff::{ExponentialBackoff, RetryConfig};
pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, GitHubClient, GitHubClientBuilder};
pub use registry::{RepoPath, RepoRegistry};
pub use types::{FeedRelease, PluginStatsBundle, ReleaseRecord, RepoStats, UNKNOWN_PLUGIN};

/// Source of repository metadata and releases.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn repo_stats(&self, repo: &RepoPath) -> Result<RepoStats>;

    /// Releases in the order GitHub lists them, newest first.
    async fn releases(&self, repo: &RepoPath) -> Result<Vec<ReleaseRecord>>;
}
