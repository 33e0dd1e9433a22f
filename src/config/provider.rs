//! Configuration provider trait.

use serde::de::DeserializeOwned;

use super::{ConfigError, ConfigResult};

/// Read-only source of configuration values keyed by dotted names
/// (`site.content.root`).
#[async_trait::async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>>;

    /// Keys starting with `prefix`.
    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>>;
}

/// Typed access on top of [`ConfigProvider::get_raw`].
pub trait ConfigProviderExt: ConfigProvider {
    /// Read `key` as JSON, or as a plain string when it is not valid JSON.
    ///
    /// `"300"` reads as a number and `content/wiki` as a string.
    fn get<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = ConfigResult<Option<T>>> + Send
    where
        Self: Sync,
    {
        async move {
            let Some(raw) = self.get_raw(key).await? else {
                return Ok(None);
            };
            serde_json::from_str(&raw)
                .or_else(|_| serde_json::from_value(serde_json::Value::String(raw)))
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })
        }
    }

    /// [`get`](Self::get) with a fallback for absent keys.
    fn get_or<T: DeserializeOwned + Send>(
        &self,
        key: &str,
        default: T,
    ) -> impl std::future::Future<Output = ConfigResult<T>> + Send
    where
        Self: Sync,
    {
        async move { Ok(self.get(key).await?.unwrap_or(default)) }
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProviderExt for P {}
