//! Plain-text search across one owner's wiki.

use serde::{Deserialize, Serialize};

use super::document::ContentDocument;
use super::store::ContentStore;

const EXCERPT_RADIUS: usize = 80;

const TITLE_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 2;
const BODY_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub slug: Vec<String>,
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub score: u32,
}

fn terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

fn score(doc: &ContentDocument, terms: &[String]) -> Option<u32> {
    let title = doc.meta.title.to_lowercase();
    let description = doc.meta.description.to_lowercase();
    let body = doc.body.to_lowercase();

    terms.iter().try_fold(0, |total, term| {
        let weight = if title.contains(term.as_str()) {
            TITLE_WEIGHT
        } else if description.contains(term.as_str()) {
            DESCRIPTION_WEIGHT
        } else if body.contains(term.as_str()) {
            BODY_WEIGHT
        } else {
            return None;
        };
        Some(total + weight)
    })
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text around the first body match, or the description when the body has none.
fn excerpt(doc: &ContentDocument, terms: &[String]) -> String {
    let lower = doc.body.to_lowercase();
    // Lowercasing may change byte lengths; only trust offsets when it did not.
    let position = (lower.len() == doc.body.len())
        .then(|| terms.iter().filter_map(|t| lower.find(t.as_str())).min())
        .flatten();

    match position {
        Some(pos) => {
            let start = floor_char_boundary(&doc.body, pos.saturating_sub(EXCERPT_RADIUS));
            let end = ceil_char_boundary(&doc.body, (pos + EXCERPT_RADIUS).min(doc.body.len()));
            let mut text = collapse_whitespace(&doc.body[start..end]);
            if start > 0 {
                text.insert_str(0, "... ");
            }
            if end < doc.body.len() {
                text.push_str(" ...");
            }
            text
        }
        None if !doc.meta.description.is_empty() => doc.meta.description.clone(),
        None => {
            let end = ceil_char_boundary(&doc.body, (EXCERPT_RADIUS * 2).min(doc.body.len()));
            collapse_whitespace(&doc.body[..end])
        }
    }
}

impl ContentStore {
    /// Find documents containing every query term.
    ///
    /// Hits are ranked by where each term matched (title, then description,
    /// then body) and by title for equal scores.
    pub fn search(&self, owner: &str, query: &str, limit: usize) -> Vec<SearchHit> {
        let terms = terms(query);
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let documents = self
            .resolve_home_document(owner)
            .into_iter()
            .chain(
                self.enumerate_all_paths(owner)
                    .into_iter()
                    .filter_map(|path| self.resolve_document(owner, &path)),
            );

        let mut hits: Vec<SearchHit> = documents
            .filter_map(|doc| {
                let score = score(&doc, &terms)?;
                Some(SearchHit {
                    href: doc.href(),
                    excerpt: excerpt(&doc, &terms),
                    title: doc.meta.title,
                    slug: doc.slug,
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.title.cmp(&b.title)));
        hits.truncate(limit);

        tracing::debug!(owner, query, hits = hits.len(), "Wiki search");
        hits
    }
}
