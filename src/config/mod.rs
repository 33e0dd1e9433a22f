//! Layered configuration providers and site settings.
//!
//! ```rust,no_run
//! use hypersite::config::{ConfigBuilder, MemoryConfigProvider, SiteConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ConfigBuilder::new()
//!     .env_with_prefix("HYPERSITE_")
//!     .memory(MemoryConfigProvider::new().value("site.content.root", "docs/wiki"))
//!     .build();
//! let config = SiteConfig::load(&provider).await?;
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod layered;
pub mod memory;
pub mod provider;
pub mod site;

pub use env::EnvConfigProvider;
pub use layered::LayeredConfigProvider;
pub use memory::MemoryConfigProvider;
pub use provider::{ConfigProvider, ConfigProviderExt};
pub use site::SiteConfig;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Provider error: {message}")]
    Provider { message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Collects providers in priority order; the first one added wins.
#[derive(Default)]
pub struct ConfigBuilder {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(self) -> Self {
        self.provider(Box::new(EnvConfigProvider::new()))
    }

    pub fn env_with_prefix(self, prefix: &str) -> Self {
        self.provider(Box::new(EnvConfigProvider::prefixed(prefix)))
    }

    pub fn memory(self, provider: MemoryConfigProvider) -> Self {
        self.provider(Box::new(provider))
    }

    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> LayeredConfigProvider {
        let mut layered = LayeredConfigProvider::new();
        for provider in self.providers {
            layered.push(provider);
        }
        layered
    }
}
