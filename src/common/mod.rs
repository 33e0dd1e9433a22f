mod cache;
mod directory;
mod frontmatter;

pub use cache::{DEFAULT_TTL, TtlCache};
pub(crate) use directory::{INDEX_FILE, MDX_EXTENSION, is_index_file, is_mdx, is_safe_segment};
pub use frontmatter::{ParsedDocument, parse_frontmatter_lenient, split_frontmatter};
