//! Filesystem predicate for candidate document paths.

use std::path::{Path, PathBuf};

/// Maps an extensionless document path to its markdown source file.
pub fn source_path(root: &Path, doc: &str) -> PathBuf {
    root.join(format!("{doc}.md"))
}

/// Returns true when a markdown document exists at `{root}/{doc}.md`.
///
/// Pure read-only predicate; the resolver probes its candidate list through
/// this before falling back to a tree search.
pub fn document_exists(root: &Path, doc: &str) -> bool {
    source_path(root, doc).is_file()
}
