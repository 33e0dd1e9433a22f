use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_PLUGIN: &str = "Unknown plugin";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRecord {
    pub tag: String,
    pub title: String,
    pub notes: String,
    /// `None` for drafts and unparseable timestamps.
    pub published_at: Option<DateTime<Utc>>,
    pub url: String,
    /// Sum of `download_count` over the release's assets.
    pub downloads: u64,
}

/// Repository metadata and releases of one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginStatsBundle {
    pub repo: String,
    pub stats: Option<RepoStats>,
    pub releases: Vec<ReleaseRecord>,
    pub total_downloads: u64,
    pub latest_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginStatsBundle {
    /// Build a bundle, deriving the totals from `releases`.
    ///
    /// `releases` keeps the API's order (newest first); the first tag is the
    /// latest version.
    pub fn new(
        repo: impl Into<String>,
        stats: Option<RepoStats>,
        releases: Vec<ReleaseRecord>,
    ) -> Self {
        let total_downloads = releases
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.downloads));
        let latest_version = releases.first().map(|r| r.tag.clone());
        Self {
            repo: repo.into(),
            stats,
            releases,
            total_downloads,
            latest_version,
            error: None,
        }
    }

    /// Bundle for an id with no registered repository.
    pub fn unknown(owner: impl Into<String>) -> Self {
        Self {
            error: Some(UNKNOWN_PLUGIN.to_string()),
            ..Self::new(owner, None, Vec::new())
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.error.as_deref() == Some(UNKNOWN_PLUGIN)
    }
}

/// A release tagged with the plugin it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRelease {
    #[serde(flatten)]
    pub release: ReleaseRecord,
    pub plugin_id: String,
    pub plugin_name: String,
}

// GitHub REST payloads. Counts GitHub omits or nulls are read as zero.

#[derive(Debug, Deserialize)]
pub(crate) struct RepoResponse {
    #[serde(default)]
    stargazers_count: Option<u64>,
    #[serde(default)]
    forks_count: Option<u64>,
    #[serde(default)]
    open_issues_count: Option<u64>,
    #[serde(default)]
    watchers_count: Option<u64>,
}

impl From<RepoResponse> for RepoStats {
    fn from(r: RepoResponse) -> Self {
        Self {
            stars: r.stargazers_count.unwrap_or(0),
            forks: r.forks_count.unwrap_or(0),
            open_issues: r.open_issues_count.unwrap_or(0),
            watchers: r.watchers_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetResponse {
    #[serde(default)]
    download_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseResponse {
    #[serde(default)]
    tag_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    assets: Option<Vec<AssetResponse>>,
}

impl From<ReleaseResponse> for ReleaseRecord {
    fn from(r: ReleaseResponse) -> Self {
        let downloads = r
            .assets
            .unwrap_or_default()
            .iter()
            .filter_map(|a| a.download_count)
            .fold(0u64, |total, n| total.saturating_add(n));
        let published_at = r
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let title = r
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| r.tag_name.clone());

        Self {
            tag: r.tag_name,
            title,
            notes: r.body.unwrap_or_default(),
            published_at,
            url: r.html_url.unwrap_or_default(),
            downloads,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
