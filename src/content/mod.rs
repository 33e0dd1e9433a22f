//! Content Discovery Service: MDX wiki pages stored as `<root>/<owner>/...`.
//!
//! ```text
//! content/wiki/
//! └── hyperfactions/
//!     ├── index.mdx                     -> []
//!     ├── getting-started/
//!     │   └── installation.mdx          -> ["getting-started", "installation"]
//!     └── concepts/
//!         ├── index.mdx                 -> ["concepts"]
//!         └── power-system.mdx          -> ["concepts", "power-system"]
//! ```

mod document;
mod fs;
mod search;
mod store;
mod toc;

pub use document::{ContentDocument, DEFAULT_HOME_TITLE, DEFAULT_TITLE, DocumentMeta};
pub use fs::{ContentFs, FsEntry, MemoryFs, OsFs};
pub use search::SearchHit;
pub use store::ContentStore;
pub use toc::{Slugger, TocEntry, slugify, table_of_contents};

/// Site URL path of a wiki page: `/plugins/{owner}/wiki[/{segments}]`.
pub fn wiki_href<S: AsRef<str>>(owner: &str, segments: &[S]) -> String {
    let mut href = format!("/plugins/{}/wiki", owner);
    for segment in segments {
        href.push('/');
        href.push_str(segment.as_ref());
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_href() {
        assert_eq!(wiki_href::<&str>("hyperperms", &[]), "/plugins/hyperperms/wiki");
        assert_eq!(
            wiki_href("hyperfactions", &["getting-started", "installation"]),
            "/plugins/hyperfactions/wiki/getting-started/installation"
        );
    }
}
