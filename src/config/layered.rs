//! Provider chain where earlier providers take priority.

use std::collections::BTreeSet;

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Default)]
pub struct LayeredConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl LayeredConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider with lower priority than those already added.
    pub fn push(&mut self, provider: Box<dyn ConfigProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for LayeredConfigProvider {
    fn name(&self) -> &str {
        "layered"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        for provider in &self.providers {
            if let Some(value) = provider.get_raw(key).await? {
                tracing::trace!(key, provider = provider.name(), "Config value resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let mut keys = BTreeSet::new();
        for provider in &self.providers {
            keys.extend(provider.list_keys(prefix).await?);
        }
        Ok(keys.into_iter().collect())
    }
}

impl std::fmt::Debug for LayeredConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredConfigProvider")
            .field("providers", &self.provider_names())
            .finish()
    }
}
