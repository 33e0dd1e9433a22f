use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

impl Breadcrumb {
    fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// "getting-started" -> "Getting Started"
pub fn format_segment_label(segment: &str) -> String {
    segment
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trail from the plugin list down to the page's parent directory.
///
/// The page itself is not included; its title comes from the document.
pub fn breadcrumbs<S: AsRef<str>>(owner: &str, plugin_name: &str, slug: &[S]) -> Vec<Breadcrumb> {
    let wiki = format!("/plugins/{}/wiki", owner);
    let mut trail = vec![
        Breadcrumb::new("Plugins", "/plugins"),
        Breadcrumb::new(plugin_name, format!("/plugins/{}", owner)),
        Breadcrumb::new("Wiki", wiki.clone()),
    ];

    let mut path = wiki;
    if let Some((_, parents)) = slug.split_last() {
        for segment in parents {
            let segment = segment.as_ref();
            path.push('/');
            path.push_str(segment);
            trail.push(Breadcrumb::new(format_segment_label(segment), path.clone()));
        }
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_segment_label() {
        assert_eq!(format_segment_label("getting-started"), "Getting Started");
        assert_eq!(format_segment_label("gui"), "Gui");
        assert_eq!(format_segment_label("a--b"), "A  B");
    }

    #[test]
    fn test_home_trail() {
        let trail = breadcrumbs::<&str>("hyperfactions", "HyperFactions", &[]);
        let labels: Vec<_> = trail.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Plugins", "HyperFactions", "Wiki"]);
        assert_eq!(trail[2].href, "/plugins/hyperfactions/wiki");
    }

    #[test]
    fn test_nested_trail_excludes_page() {
        let trail = breadcrumbs(
            "hyperfactions",
            "HyperFactions",
            &["reference", "advanced-config", "storage"],
        );
        assert_eq!(trail.len(), 5);
        assert_eq!(trail[3].label, "Reference");
        assert_eq!(trail[3].href, "/plugins/hyperfactions/wiki/reference");
        assert_eq!(trail[4].label, "Advanced Config");
        assert_eq!(
            trail[4].href,
            "/plugins/hyperfactions/wiki/reference/advanced-config"
        );
    }
}
