use serde::de::DeserializeOwned;

const DELIMITER: &str = "---";

pub struct ParsedDocument<F> {
    pub frontmatter: F,
    pub body: String,
}

/// Split a document into its raw YAML header and body.
///
/// The header must open on the first line and close on a line that is exactly
/// `---`. Returns `None` when the document has no (terminated) header.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &content[header_start..offset];
            let body = &content[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

/// Parse front-matter, falling back to `F::default()` on any problem.
///
/// A malformed header still has its lines stripped from the body; a document
/// without a header keeps its full text as body.
pub fn parse_frontmatter_lenient<F: DeserializeOwned + Default>(
    content: &str,
) -> ParsedDocument<F> {
    match split_frontmatter(content) {
        Some((header, body)) => {
            let frontmatter = if header.trim().is_empty() {
                F::default()
            } else {
                serde_yaml_bw::from_str(header).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Ignoring malformed frontmatter");
                    F::default()
                })
            };
            ParsedDocument {
                frontmatter,
                body: body.to_string(),
            }
        }
        None => ParsedDocument {
            frontmatter: F::default(),
            body: content.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct TestFrontmatter {
        #[serde(default)]
        title: String,
        #[serde(default)]
        description: String,
    }

    #[test]
    fn test_parse_valid() {
        let content = r#"---
title: Installation
description: Getting the plugin onto your server
---

Body content here."#;

        let doc = parse_frontmatter_lenient::<TestFrontmatter>(content);
        assert_eq!(doc.frontmatter.title, "Installation");
        assert_eq!(doc.frontmatter.description, "Getting the plugin onto your server");
        assert_eq!(doc.body, "\nBody content here.");
    }

    #[test]
    fn test_split_requires_terminated_header() {
        assert!(split_frontmatter("Just content without frontmatter").is_none());
        assert!(split_frontmatter("---\ntitle: test\nNo closing delimiter").is_none());
        assert_eq!(
            split_frontmatter("\u{feff}---\na: 1\n---\nrest"),
            Some(("a: 1\n", "rest"))
        );
    }

    #[test]
    fn test_delimiter_inside_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nabove\n---\nbelow\n";
        let doc = parse_frontmatter_lenient::<TestFrontmatter>(content);
        assert_eq!(doc.frontmatter.title, "Rules");
        assert_eq!(doc.body, "above\n---\nbelow\n");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let doc = parse_frontmatter_lenient::<TestFrontmatter>(content);
        assert_eq!(doc.frontmatter.title, "Windows");
        assert_eq!(doc.body, "Body\r\n");
    }

    #[test]
    fn test_lenient_malformed_yaml() {
        let content = "---\ntitle: [unclosed\n---\nStill readable";
        let doc = parse_frontmatter_lenient::<TestFrontmatter>(content);
        assert_eq!(doc.frontmatter, TestFrontmatter::default());
        assert_eq!(doc.body, "Still readable");
    }

    #[test]
    fn test_lenient_without_header() {
        let doc = parse_frontmatter_lenient::<TestFrontmatter>("# Heading\n");
        assert_eq!(doc.frontmatter, TestFrontmatter::default());
        assert_eq!(doc.body, "# Heading\n");
    }

    #[test]
    fn test_lenient_empty_header() {
        let doc = parse_frontmatter_lenient::<TestFrontmatter>("---\n---\nBody");
        assert_eq!(doc.frontmatter, TestFrontmatter::default());
        assert_eq!(doc.body, "Body");
    }
}
