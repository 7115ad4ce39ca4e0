//! Tree search for bare document names.
//!
//! Last-resort strategy before the override table: when none of the direct
//! path candidates exist, the final path component of the target is searched
//! for across the whole source tree. References stay valid when pages move
//! between categories, at the cost of an O(tree) walk.

use std::path::Path;

use walkdir::WalkDir;

/// Searches the tree rooted at `root` for a document named `name`.
///
/// Directories are visited top-down in pre-order, entries sorted by file
/// name so the first match is deterministic. Two predicates per directory,
/// evaluated in order:
///
/// 1. the directory contains `{name}.md` — the document is
///    `{dir}/{name}`;
/// 2. the directory itself is named `name` — the document is
///    `{dir}/index` (directory-style pages live in their `index.md`).
///
/// Returns the extensionless document path relative to `root` with `/`
/// separators, or `None` on exhaustion. Exhaustion is not a fault: callers
/// treat it as one more candidate that did not pan out.
pub fn find(name: &str, root: &Path) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .expect("walked entries live below the root");

        if entry.path().join(format!("{name}.md")).is_file() {
            return Some(join_doc(rel, name));
        }

        // The root itself is the whole tree, never a named match.
        if entry.depth() > 0 && entry.file_name().to_str() == Some(name) {
            return Some(join_doc(rel, "index"));
        }
    }

    None
}

fn join_doc(dir: &Path, leaf: &str) -> String {
    let mut parts: Vec<String> = dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.push(leaf.to_string());
    parts.join("/")
}
