//! File-system seam for content discovery.
//!
//! The walk and resolution logic only talk to [`ContentFs`], so the same code
//! runs against the real disk ([`OsFs`]) and an in-memory tree ([`MemoryFs`]).

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub name: String,
    pub is_dir: bool,
}

impl FsEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Read-only file-system operations used by the content store.
pub trait ContentFs: Send + Sync {
    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List a directory. Implementations return entries sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;
}

/// The operating system's file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl ContentFs for OsFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let listing = std::fs::read_dir(path)?.map(|entry| {
            entry.map(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir());
                (entry.file_name(), is_dir)
            })
        });
        Ok(collect_entries(path, listing))
    }
}

/// Sorted listing that skips entries which cannot be read or named.
fn collect_entries(
    dir: &Path,
    listing: impl Iterator<Item = io::Result<(OsString, io::Result<bool>)>>,
) -> Vec<FsEntry> {
    let mut entries = Vec::new();
    for entry in listing {
        let (name, is_dir) = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let Ok(name) = name.into_string() else {
            tracing::debug!(path = %dir.display(), "Skipping non UTF-8 file name");
            continue;
        };
        let is_dir = match is_dir {
            Ok(is_dir) => is_dir,
            Err(e) => {
                tracing::debug!(
                    path = %dir.join(&name).display(),
                    error = %e,
                    "Skipping entry of unknown type"
                );
                continue;
            }
        };
        entries.push(FsEntry { name, is_dir });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// In-memory file tree. Directories exist implicitly as ancestors of files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ContentFs for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut children: BTreeMap<String, bool> = BTreeMap::new();

        for file in self.files.keys() {
            let Ok(rest) = file.strip_prefix(path) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = components.next().is_some();
            let slot = children.entry(name).or_insert(is_dir);
            *slot |= is_dir;
        }

        if children.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", path.display()),
            ));
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| FsEntry { name, is_dir })
            .collect())
    }
}
