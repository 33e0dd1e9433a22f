use serde::{Deserialize, Serialize};

use crate::common::parse_frontmatter_lenient;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_HOME_TITLE: &str = "Wiki";

/// Metadata carried in a content file's front-matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// A wiki page resolved from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub owner: String,
    pub slug: Vec<String>,
    pub meta: DocumentMeta,
    /// Raw MDX source with the front-matter removed.
    pub body: String,
}

// Fields are read as loose JSON values so a wrong type degrades to the
// default instead of failing the whole header.
#[derive(Debug, Default, Deserialize)]
struct RawMeta {
    #[serde(default)]
    title: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<serde_json::Value>,
    #[serde(default)]
    order: Option<serde_json::Value>,
}

fn scalar_string(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl DocumentMeta {
    fn from_raw(raw: RawMeta, default_title: &str) -> Self {
        Self {
            title: scalar_string(raw.title).unwrap_or_else(|| default_title.to_string()),
            description: scalar_string(raw.description).unwrap_or_default(),
            order: raw.order.and_then(|v| v.as_i64()),
        }
    }
}

impl ContentDocument {
    /// Parse file content into a document. Never fails; see [`DocumentMeta`] defaults.
    pub fn parse(
        owner: impl Into<String>,
        slug: Vec<String>,
        content: &str,
        default_title: &str,
    ) -> Self {
        let parsed = parse_frontmatter_lenient::<RawMeta>(content);
        Self {
            owner: owner.into(),
            slug,
            meta: DocumentMeta::from_raw(parsed.frontmatter, default_title),
            body: parsed.body,
        }
    }

    pub fn is_home(&self) -> bool {
        self.slug.is_empty()
    }

    pub fn href(&self) -> String {
        super::wiki_href(&self.owner, &self.slug)
    }
}
