//! Static override table for known out-of-tree targets.
//!
//! A handful of references point at content intentionally hosted outside the
//! documentation tree (subprojects with their own sites). Those have no local
//! document to extract a title from, so both the URL and the display name are
//! hand-authored here. The table is consulted only after every
//! filesystem-based strategy has failed.

/// Looks up a hand-authored `(url, display name)` pair for a reference key.
pub fn lookup(key: &str) -> Option<(&'static str, &'static str)> {
    match key {
        "xla" => Some(("https://www.tensorflow.org/performance/xla/", "XLA 编译器")),
        _ => None,
    }
}
