//! Heading extraction for the "On this page" sidebar.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id, matching the id the renderer assigns to the heading.
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// GitHub-style heading anchors with per-document de-duplication.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();

        if let Some(mut count) = self.occurrences.get(&base).copied() {
            loop {
                count += 1;
                slug = format!("{}-{}", base, count);
                if !self.occurrences.contains_key(&slug) {
                    break;
                }
            }
            self.occurrences.insert(base, count);
        }

        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{M}\p{Nd}\p{Pc} -]").expect("valid slug regex"))
}

/// Lowercase, keep letters, marks, decimal digits, connector punctuation and
/// hyphens, then turn spaces into hyphens.
pub fn slugify(text: &str) -> String {
    disallowed_chars()
        .replace_all(&text.to_lowercase(), "")
        .replace(' ', "-")
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(2..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let title = rest.trim();
    let title = match title.trim_end_matches('#') {
        stripped if stripped.ends_with([' ', '\t']) => stripped.trim_end(),
        _ => title,
    };
    (!title.is_empty()).then_some((hashes as u8, title))
}

/// Level 2 and 3 headings of a markdown/MDX body, skipping fenced code.
pub fn table_of_contents(body: &str) -> Vec<TocEntry> {
    let mut slugger = Slugger::new();
    let mut entries = Vec::new();
    let mut fence: Option<&str> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();
        let marker = ["```", "~~~"]
            .into_iter()
            .find(|m| trimmed.starts_with(m));

        match (fence, marker) {
            (Some(open), Some(m)) if open == m => {
                fence = None;
                continue;
            }
            (Some(_), _) => continue,
            (None, Some(m)) => {
                fence = Some(m);
                continue;
            }
            (None, None) => {}
        }

        if let Some((level, title)) = heading(line) {
            entries.push(TocEntry {
                id: slugger.slug(title),
                title: title.to_string(),
                level,
            });
        }
    }

    entries
}
