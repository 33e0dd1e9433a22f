//! Environment variable configuration provider.

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

/// Reads `a.b.c` from `A_B_C`, optionally behind a prefix (`HYPERSITE_A_B_C`).
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_key(&self, key: &str) -> String {
        let name = key.to_uppercase().replace('.', "_");
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name,
        }
    }

    fn key_from_env(&self, env_name: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(prefix) => env_name.strip_prefix(prefix.as_str())?,
            None => env_name,
        };
        Some(name.to_lowercase().replace('_', "."))
    }
}

#[async_trait::async_trait]
impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        match std::env::var(self.env_key(key)) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        }
    }

    async fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let env_prefix = self.env_key(prefix);
        let mut keys: Vec<String> = std::env::vars_os()
            .filter_map(|(k, _)| k.into_string().ok())
            .filter(|k| k.starts_with(&env_prefix))
            .filter_map(|k| self.key_from_env(&k))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
