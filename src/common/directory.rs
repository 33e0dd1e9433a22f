use std::path::Path;

pub const MDX_EXTENSION: &str = "mdx";
pub const INDEX_FILE: &str = "index.mdx";

pub fn is_mdx(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == MDX_EXTENSION)
}

pub fn is_index_file(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == INDEX_FILE)
}

/// A single path component that cannot escape its parent directory.
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}
