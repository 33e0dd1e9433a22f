//! # hypersite
//!
//! Read-only core of the HyperSystems plugin website: MDX wiki content
//! discovery, declarative wiki navigation, and cached GitHub repository
//! statistics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hypersite::Site;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hypersite::Error> {
//!     let site = Site::from_env().await?;
//!
//!     if site.content().has_content("hyperfactions") {
//!         let slug = ["getting-started", "installation"];
//!         if let Some(page) = site.content().resolve_document("hyperfactions", &slug) {
//!             let href = hypersite::content::wiki_href("hyperfactions", &slug);
//!             let adjacent = site.navigation().adjacent("hyperfactions", &href);
//!             println!("{} (next: {:?})", page.meta.title, adjacent.next.map(|n| n.title));
//!         }
//!     }
//!
//!     let bundle = site.stats().fetch_stats_bundle("hyperfactions").await;
//!     println!("{} downloads", bundle.total_downloads);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod config;
pub mod content;
pub mod github;
pub mod navigation;
pub mod plugins;
mod site;

pub use common::{ParsedDocument, TtlCache};
pub use config::{
    ConfigBuilder, ConfigError, ConfigProvider, ConfigProviderExt, EnvConfigProvider,
    MemoryConfigProvider, SiteConfig,
};
pub use content::{
    ContentDocument, ContentFs, ContentStore, DocumentMeta, MemoryFs, OsFs, SearchHit, TocEntry,
    table_of_contents, wiki_href,
};
pub use github::{
    FeedRelease, GitHubApi, GitHubClient, PluginStatsBundle, ReleaseRecord, RepoPath,
    RepoRegistry, RepoStats, RetryConfig, StatsAggregator, UNKNOWN_PLUGIN,
};
pub use navigation::{Adjacent, Breadcrumb, NavItem, NavSection, NavigationIndex};
pub use plugins::{PluginInfo, find_plugin, plugin_name};
pub use site::Site;

/// Error type for hypersite operations.
///
/// Lookups that miss (unknown owner, absent page) are not errors; they return
/// `None` or an empty value. These variants cover loaders and the remote API.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Remote API returned a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Network connectivity or request failed.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document (navigation file, front-matter) could not be parsed.
    #[error("YAML parsing failed: {0}")]
    Yaml(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation exceeded timeout.
    #[error("Operation timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(std::time::Duration),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication, authorization or rate limiting (401, 403, 429)
    Authorization,
    /// Configuration, parsing, or setup errors
    Configuration,
    /// Network, timeout or server errors that may succeed on retry
    Transient,
    /// Other remote rejections (404, 422, ...)
    Rejected,
    /// Internal errors (IO, JSON)
    Internal,
}

impl Error {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Api {
                status: 401 | 403 | 429,
                ..
            } => ErrorCategory::Authorization,
            Error::Api {
                status: 500..=599,
                ..
            } => ErrorCategory::Transient,
            Error::Api { .. } => ErrorCategory::Rejected,

            Error::Network(_) | Error::Timeout(_) => ErrorCategory::Transient,

            Error::Config(_) | Error::Yaml(_) => ErrorCategory::Configuration,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::InvalidValue { key, message } => {
                Error::Config(format!("Invalid value for {}: {}", key, message))
            }
            config::ConfigError::Serialization(e) => Error::Json(e),
            config::ConfigError::Io(e) => Error::Io(e),
            config::ConfigError::Env(e) => Error::Config(e.to_string()),
            config::ConfigError::Provider { message } => Error::Config(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::api(403, "API rate limit exceeded");
        assert!(err.to_string().contains("HTTP 403"));
        assert!(err.to_string().contains("rate limit"));
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(Error::api(502, "Bad gateway").is_retryable());
        assert!(Error::Timeout(std::time::Duration::from_secs(10)).is_retryable());

        assert!(!Error::api(403, "Forbidden").is_retryable());
        assert!(!Error::api(404, "Not Found").is_retryable());
        assert!(!Error::Config("bad".into()).is_retryable());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::api(401, "Bad credentials").category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            Error::api(429, "Too many requests").category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            Error::api(404, "Not Found").category(),
            ErrorCategory::Rejected
        );
        assert_eq!(
            Error::Yaml("bad indent".into()).category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(Error::api(500, "boom").status_code(), Some(500));
        assert_eq!(Error::Config("x".into()).status_code(), None);
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = config::ConfigError::InvalidValue {
            key: "site.stats.ttl.secs".to_string(),
            message: "not a number".to_string(),
        };
        let err: Error = config_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
