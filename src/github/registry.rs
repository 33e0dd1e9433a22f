//! Owner id -> GitHub repository mapping.

use std::fmt;
use std::str::FromStr;

use crate::plugins::PLUGINS;
use crate::{Error, Result};

/// `{owner}/{repo}` on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoPath {
    full: String,
    split: usize,
}

impl RepoPath {
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid(owner) || !valid(repo) {
            return Err(Error::Config(format!(
                "Invalid repository path: {}/{}",
                owner, repo
            )));
        }
        Ok(Self {
            full: format!("{}/{}", owner, repo),
            split: owner.len(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.full[..self.split]
    }

    pub fn repo(&self) -> &str {
        &self.full[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl FromStr for RepoPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (owner, repo) = s
            .split_once('/')
            .ok_or_else(|| Error::Config(format!("Invalid repository path: {}", s)))?;
        Self::new(owner, repo)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegistryEntry {
    id: String,
    name: Option<String>,
    repo: RepoPath,
}

/// Fixed set of owners whose repositories are tracked, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RepoRegistry {
    entries: Vec<RegistryEntry>,
}

impl RepoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every plugin in [`PLUGINS`].
    pub fn builtin() -> Self {
        PLUGINS.iter().fold(Self::new(), |registry, plugin| {
            match plugin.repo.parse::<RepoPath>() {
                Ok(repo) => registry.with_named_repo(plugin.id, plugin.name, repo),
                Err(e) => {
                    tracing::warn!(plugin = plugin.id, error = %e, "Skipping plugin repository");
                    registry
                }
            }
        })
    }

    /// Register `id` without a display name. Re-registering an id replaces it.
    pub fn with_repo(self, id: impl Into<String>, repo: RepoPath) -> Self {
        self.insert(id.into(), None, repo)
    }

    pub fn with_named_repo(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        repo: RepoPath,
    ) -> Self {
        self.insert(id.into(), Some(name.into()), repo)
    }

    fn insert(mut self, id: String, name: Option<String>, repo: RepoPath) -> Self {
        let entry = RegistryEntry { id, name, repo };
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn repo(&self, id: &str) -> Option<&RepoPath> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.repo)
    }

    /// `{owner}/{repo}` for a registered id.
    pub fn repo_path(&self, id: &str) -> Option<&str> {
        self.repo(id).map(RepoPath::as_str)
    }

    /// Human-readable name, falling back to the id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.name.as_deref())
            .unwrap_or(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
