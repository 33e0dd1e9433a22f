//! Navigation Index: declared per-owner sidebar trees and prev/next lookup.

mod breadcrumb;
mod builtin;

pub use breadcrumb::{Breadcrumb, breadcrumbs, format_segment_label};
pub use builtin::builtin_navigation;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub href: String,
    /// Nested links. Shown in the sidebar but ignored by [`NavigationIndex::adjacent`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavItem {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = NavItem>) -> Self {
        self.items.extend(items);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<NavItem>,
}

impl NavSection {
    pub fn new(title: impl Into<String>, items: impl IntoIterator<Item = NavItem>) -> Self {
        Self {
            title: title.into(),
            items: items.into_iter().collect(),
        }
    }
}

/// Previous and next pages around the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacent {
    pub previous: Option<NavItem>,
    pub next: Option<NavItem>,
}

/// Immutable owner -> sections map, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct NavigationIndex {
    trees: HashMap<String, Vec<NavSection>>,
}

impl NavigationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The navigation shipped with the site.
    pub fn builtin() -> Self {
        Self::from_trees(builtin_navigation())
    }

    pub fn from_trees(trees: impl IntoIterator<Item = (String, Vec<NavSection>)>) -> Self {
        let index = Self {
            trees: trees.into_iter().collect(),
        };
        index.warn_duplicates();
        index
    }

    pub fn with_owner(
        mut self,
        owner: impl Into<String>,
        sections: impl IntoIterator<Item = NavSection>,
    ) -> Self {
        self.trees
            .insert(owner.into(), sections.into_iter().collect());
        self
    }

    /// Parse an owner -> sections mapping from YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let trees: HashMap<String, Vec<NavSection>> = serde_yaml_bw::from_str(content)
            .map_err(|e| Error::Yaml(format!("Invalid navigation file: {}", e)))?;
        Ok(Self::from_trees(trees))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let trees: HashMap<String, Vec<NavSection>> = serde_json::from_str(content)?;
        Ok(Self::from_trees(trees))
    }

    /// Load a navigation file; `.json` is read as JSON, anything else as YAML.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!(
                "Failed to read navigation file {}: {}",
                path.display(),
                e
            ))
        })?;

        let index = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::debug!(path = %path.display(), owners = index.trees.len(), "Loaded navigation");
        Ok(index)
    }

    /// Sections for `owner`; empty for an unknown owner.
    pub fn navigation(&self, owner: &str) -> &[NavSection] {
        self.trees.get(owner).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Section items in declaration order. Nested items are not included.
    pub fn flattened(&self, owner: &str) -> Vec<&NavItem> {
        self.navigation(owner)
            .iter()
            .flat_map(|section| section.items.iter())
            .collect()
    }

    /// Neighbours of the first item whose href equals `current_path` exactly.
    pub fn adjacent(&self, owner: &str, current_path: &str) -> Adjacent {
        let pages = self.flattened(owner);
        let Some(index) = pages.iter().position(|page| page.href == current_path) else {
            return Adjacent::default();
        };

        Adjacent {
            previous: index
                .checked_sub(1)
                .and_then(|i| pages.get(i))
                .map(|item| (*item).clone()),
            next: pages.get(index + 1).map(|item| (*item).clone()),
        }
    }

    /// Hrefs that occur more than once in the owner's flattened list.
    pub fn duplicate_hrefs(&self, owner: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for item in self.flattened(owner) {
            if !seen.insert(item.href.as_str()) && !duplicates.contains(&item.href.as_str()) {
                duplicates.push(item.href.as_str());
            }
        }
        duplicates
    }

    fn warn_duplicates(&self) {
        for owner in self.owners() {
            for href in self.duplicate_hrefs(owner) {
                tracing::warn!(owner, href, "Duplicate navigation href; adjacency uses the first");
            }
        }
    }
}
