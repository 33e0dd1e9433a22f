//! Content discovery over a per-owner directory tree of MDX files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::document::{ContentDocument, DEFAULT_HOME_TITLE, DEFAULT_TITLE};
use super::fs::{ContentFs, OsFs};
use crate::common::{INDEX_FILE, MDX_EXTENSION, is_index_file, is_mdx, is_safe_segment};

/// Resolves wiki documents below `<root>/<owner>/`.
///
/// Every call reads the file system afresh; nothing is cached.
#[derive(Clone)]
pub struct ContentStore {
    root: PathBuf,
    fs: Arc<dyn ContentFs>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl ContentStore {
    /// Store backed by the operating system's file system.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, OsFs)
    }

    pub fn with_fs(root: impl Into<PathBuf>, fs: impl ContentFs + 'static) -> Self {
        Self {
            root: root.into(),
            fs: Arc::new(fs),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn owner_dir(&self, owner: &str) -> Option<PathBuf> {
        is_safe_segment(owner).then(|| self.root.join(owner))
    }

    /// True when the owner directory exists and has a top-level `index.mdx`.
    pub fn has_content(&self, owner: &str) -> bool {
        self.owner_dir(owner)
            .is_some_and(|dir| self.fs.is_dir(&dir) && self.fs.is_file(&dir.join(INDEX_FILE)))
    }

    /// Resolve `segments` to a document.
    ///
    /// `<segments>.mdx` wins over `<segments>/index.mdx` when both exist. An
    /// empty path resolves the home document.
    pub fn resolve_document<S: AsRef<str>>(
        &self,
        owner: &str,
        segments: &[S],
    ) -> Option<ContentDocument> {
        if segments.is_empty() {
            return self.resolve_home_document(owner);
        }

        let slug: Vec<String> = segments.iter().map(|s| s.as_ref().to_string()).collect();
        if !slug.iter().all(|s| is_safe_segment(s)) {
            tracing::debug!(owner, ?slug, "Rejecting unsafe content path");
            return None;
        }

        let page_path = slug
            .iter()
            .fold(self.owner_dir(owner)?, |path, segment| path.join(segment));

        let candidates = [append_extension(&page_path), page_path.join(INDEX_FILE)];

        candidates
            .iter()
            .find(|candidate| self.fs.is_file(candidate))
            .and_then(|path| self.load(path, owner, slug, DEFAULT_TITLE))
    }

    /// Resolve the owner's top-level `index.mdx`.
    pub fn resolve_home_document(&self, owner: &str) -> Option<ContentDocument> {
        let index = self.owner_dir(owner)?.join(INDEX_FILE);
        if !self.fs.is_file(&index) {
            return None;
        }
        self.load(&index, owner, Vec::new(), DEFAULT_HOME_TITLE)
    }

    /// Every addressable sub-path of the owner's wiki, in lexical walk order.
    ///
    /// The home page itself is not included. When a leaf file and a directory
    /// index map to the same path, the path is emitted once.
    pub fn enumerate_all_paths(&self, owner: &str) -> Vec<Vec<String>> {
        let Some(dir) = self.owner_dir(owner) else {
            return Vec::new();
        };
        if !self.fs.is_dir(&dir) {
            return Vec::new();
        }

        let mut paths = Vec::new();
        collect_paths(self.fs.as_ref(), &dir, &[], &mut paths);

        let mut seen = HashSet::new();
        paths.retain(|path| {
            let first = seen.insert(path.clone());
            if !first {
                tracing::warn!(
                    owner,
                    path = %path.join("/"),
                    "Leaf file and directory index share a path; the leaf file is served"
                );
            }
            first
        });
        paths
    }

    fn load(
        &self,
        path: &Path,
        owner: &str,
        slug: Vec<String>,
        default_title: &str,
    ) -> Option<ContentDocument> {
        match self.fs.read_to_string(path) {
            Ok(content) => Some(ContentDocument::parse(owner, slug, &content, default_title)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read content file");
                None
            }
        }
    }
}

// `Path::with_extension` would replace a dotted segment's suffix ("v1.2" -> "v1.mdx").
fn append_extension(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".");
    os.push(MDX_EXTENSION);
    PathBuf::from(os)
}

/// Recursive walk producing slug paths relative to the starting directory.
pub(crate) fn collect_paths(
    fs: &dyn ContentFs,
    dir: &Path,
    prefix: &[String],
    out: &mut Vec<Vec<String>>,
) {
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to list content directory");
            return;
        }
    };

    for entry in entries {
        let path = dir.join(&entry.name);
        if entry.is_dir {
            let mut slug = prefix.to_vec();
            slug.push(entry.name);
            if fs.is_file(&path.join(INDEX_FILE)) {
                out.push(slug.clone());
            }
            collect_paths(fs, &path, &slug, out);
        } else if is_mdx(&path) && !is_index_file(&path) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let mut slug = prefix.to_vec();
            slug.push(stem.to_string());
            out.push(slug);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryFs;

    fn page(title: &str) -> String {
        format!("---\ntitle: {}\n---\n\nContent of {}.\n", title, title)
    }

    fn factions_store() -> ContentStore {
        let fs = MemoryFs::new()
            .with_file("wiki/factions/index.mdx", page("Factions Wiki"))
            .with_file(
                "wiki/factions/getting-started/installation.mdx",
                page("Installation"),
            );
        ContentStore::with_fs("wiki", fs)
    }

    #[test]
    fn test_factions_scenario() {
        let store = factions_store();

        assert!(store.has_content("factions"));

        let doc = store
            .resolve_document("factions", &["getting-started", "installation"])
            .unwrap();
        assert_eq!(doc.meta.title, "Installation");
        assert_eq!(doc.owner, "factions");
        assert_eq!(doc.slug, vec!["getting-started", "installation"]);

        assert_eq!(
            store.enumerate_all_paths("factions"),
            vec![vec!["getting-started".to_string(), "installation".to_string()]]
        );
    }

    #[test]
    fn test_home_document() {
        let store = factions_store();
        let home = store.resolve_home_document("factions").unwrap();
        assert_eq!(home.meta.title, "Factions Wiki");
        assert!(home.slug.is_empty());

        let via_empty_path = store.resolve_document::<&str>("factions", &[]).unwrap();
        assert_eq!(via_empty_path, home);

        assert!(store.resolve_home_document("perms").is_none());
    }

    #[test]
    fn test_home_title_defaults_to_wiki() {
        let fs = MemoryFs::new().with_file("wiki/perms/index.mdx", "No header here");
        let store = ContentStore::with_fs("wiki", fs);
        let home = store.resolve_home_document("perms").unwrap();
        assert_eq!(home.meta.title, "Wiki");
        assert_eq!(home.body, "No header here");
    }

    #[test]
    fn test_has_content_requires_index() {
        let fs = MemoryFs::new().with_file("wiki/chat/channels.mdx", page("Channels"));
        let store = ContentStore::with_fs("wiki", fs);
        assert!(!store.has_content("chat"));
        assert!(!store.has_content("missing"));
    }

    #[test]
    fn test_leaf_file_wins_over_directory_index() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/f/a/b.mdx", page("Leaf"))
            .with_file("wiki/f/a/b/index.mdx", page("Directory"));
        let store = ContentStore::with_fs("wiki", fs);

        let doc = store.resolve_document("f", &["a", "b"]).unwrap();
        assert_eq!(doc.meta.title, "Leaf");
    }

    #[test]
    fn test_directory_index_resolves() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/f/guides/index.mdx", page("Guides"));
        let store = ContentStore::with_fs("wiki", fs);

        let doc = store.resolve_document("f", &["guides"]).unwrap();
        assert_eq!(doc.meta.title, "Guides");
        assert!(store.resolve_document("f", &["guides", "missing"]).is_none());
    }

    #[test]
    fn test_dotted_segment_keeps_suffix() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/f/changelog/v1.2.mdx", page("Version 1.2"));
        let store = ContentStore::with_fs("wiki", fs);

        let doc = store.resolve_document("f", &["changelog", "v1.2"]).unwrap();
        assert_eq!(doc.meta.title, "Version 1.2");
    }

    #[test]
    fn test_unsafe_segments_rejected() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/secret.mdx", page("Secret"));
        let store = ContentStore::with_fs("wiki", fs);

        assert!(store.resolve_document("f", &["..", "secret"]).is_none());
        assert!(store.resolve_document("f", &["a/b"]).is_none());
        assert!(store.resolve_document("f", &[""]).is_none());
        assert!(!store.has_content(".."));
        assert!(store.enumerate_all_paths("..").is_empty());
    }

    #[test]
    fn test_enumerate_only_home() {
        let fs = MemoryFs::new().with_file("wiki/f/index.mdx", page("Home"));
        let store = ContentStore::with_fs("wiki", fs);
        assert!(store.enumerate_all_paths("f").is_empty());
    }

    #[test]
    fn test_enumerate_missing_owner() {
        let store = factions_store();
        assert!(store.enumerate_all_paths("nobody").is_empty());
    }

    #[test]
    fn test_enumerate_nested_tree() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/f/concepts/index.mdx", page("Concepts"))
            .with_file("wiki/f/concepts/power.mdx", page("Power"))
            .with_file("wiki/f/concepts/zones.mdx", page("Zones"))
            .with_file("wiki/f/commands/basic.mdx", page("Basic"))
            .with_file("wiki/f/commands/notes.md", "not mdx")
            .with_file("wiki/f/about.mdx", page("About"));
        let store = ContentStore::with_fs("wiki", fs);

        let paths = store.enumerate_all_paths("f");
        let expected: Vec<Vec<String>> = vec![
            vec!["about".into()],
            vec!["commands".into(), "basic".into()],
            vec!["concepts".into()],
            vec!["concepts".into(), "power".into()],
            vec!["concepts".into(), "zones".into()],
        ];
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_enumerate_collision_emitted_once() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/f/a.mdx", page("Leaf"))
            .with_file("wiki/f/a/index.mdx", page("Dir"));
        let store = ContentStore::with_fs("wiki", fs);

        assert_eq!(store.enumerate_all_paths("f"), vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_enumerated_paths_all_resolve() {
        let fs = MemoryFs::new()
            .with_file("wiki/f/index.mdx", page("Home"))
            .with_file("wiki/f/guides/index.mdx", page("Guides"))
            .with_file("wiki/f/guides/start.mdx", page("Start"))
            .with_file("wiki/f/reference/permissions.mdx", page("Permissions"));
        let store = ContentStore::with_fs("wiki", fs);

        for path in store.enumerate_all_paths("f") {
            assert!(
                store.resolve_document("f", &path).is_some(),
                "{:?} should resolve",
                path
            );
        }
    }

    #[test]
    fn test_os_store_on_temp_dir() {
        let temp = tempfile::tempdir().unwrap();
        let owner = temp.path().join("factions");
        std::fs::create_dir_all(owner.join("getting-started")).unwrap();
        std::fs::write(owner.join("index.mdx"), page("Factions Wiki")).unwrap();
        std::fs::write(
            owner.join("getting-started").join("installation.mdx"),
            page("Installation"),
        )
        .unwrap();

        let store = ContentStore::new(temp.path());
        assert!(store.has_content("factions"));
        assert_eq!(
            store.enumerate_all_paths("factions"),
            vec![vec!["getting-started".to_string(), "installation".to_string()]]
        );
        let doc = store
            .resolve_document("factions", &["getting-started", "installation"])
            .unwrap();
        assert_eq!(doc.meta.title, "Installation");
        assert!(doc.body.contains("Content of Installation."));
    }
}
