//! Cross-reference macro engine.
//!
//! Documentation sources embed `@{...}` reference macros in inline text.
//! A macro body is one of:
//!
//! - `tensorflow::Symbol` — a C++ API symbol, resolved to the external C++
//!   reference (namespace A);
//! - `tf.symbol.path` / `tfdbg.symbol.path` — a Python API symbol, resolved
//!   to the external Python reference (namespace B);
//! - `$doc`, `$dir/doc`, `$doc#anchor$`, `$doc$Display Text` — a local
//!   documentation page, resolved against the source tree.
//!
//! This module parses and classifies macro bodies; [`resolver`] orchestrates
//! the actual resolution.

/// External API symbol resolution (pure string transformation).
pub mod external;
/// Static override table for known out-of-tree targets.
pub mod overrides;
/// Filesystem predicate for candidate document paths.
pub mod probe;
/// Resolution orchestration.
pub mod resolver;
/// Tree search for bare document names.
pub mod search;

/// A parsed local reference: target document plus optional anchor and
/// display override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalRef {
    /// Target document path fragment, whitespace-trimmed, without the
    /// leading `$`.
    pub target: String,
    /// In-page fragment from the `#anchor$` form.
    pub anchor: Option<String>,
    /// Explicit link text from the trailing `$Display Text` segment.
    pub display: Option<String>,
}

/// Classification of a reference macro body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    /// A `tensorflow::`-namespaced C++ symbol (display suffix stripped).
    CppSymbol(String),
    /// A `tf.`/`tfdbg.`-namespaced Python symbol (display suffix stripped).
    PySymbol(String),
    /// A local documentation page reference.
    Local(LocalRef),
}

/// A resolved reference: output URL plus display label.
///
/// The label is an HTML fragment — escaped text for titles and overrides,
/// `<code>…</code>` for API symbols — spliced directly into the rendered
/// page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Absolute or domain-relative URL.
    pub url: String,
    /// Display label as an HTML fragment.
    pub label: String,
}

/// Normalizes a raw macro body: embedded newlines become spaces.
///
/// Macros may wrap across source lines inside a paragraph; the parsed text
/// node then carries the line break.
pub fn normalize_body(body: &str) -> String {
    body.replace('\n', " ")
}

/// Classifies a (normalized) macro body. First match wins.
pub fn classify(body: &str) -> Reference {
    let trimmed = body.trim();
    if trimmed.contains("tensorflow::") {
        return Reference::CppSymbol(strip_display_suffix(trimmed).to_string());
    }
    // Prefix match, not substring: a local target like `$guide/tf.contrib`
    // must stay local.
    if trimmed.starts_with("tf.") || trimmed.starts_with("tfdbg.") {
        return Reference::PySymbol(strip_display_suffix(trimmed).to_string());
    }
    Reference::Local(parse_local(trimmed))
}

/// Strips a trailing `$suffix` (display override) from a symbol reference.
fn strip_display_suffix(body: &str) -> &str {
    match body.split_once('$') {
        Some((symbol, _)) => symbol,
        None => body,
    }
}

fn parse_local(body: &str) -> LocalRef {
    let body = body.strip_prefix('$').unwrap_or(body);

    // At most one display segment: everything after the first interior `$`.
    let (target_part, display) = match body.split_once('$') {
        Some((part, display)) if !display.is_empty() => (part, Some(display.to_string())),
        Some((part, _)) => (part, None),
        None => (body, None),
    };

    // At most one anchor, delimited by `#`.
    let (target, anchor) = match target_part.split_once('#') {
        Some((target, anchor)) if !anchor.is_empty() => (target, Some(anchor.to_string())),
        Some((target, _)) => (target, None),
        None => (target_part, None),
    };

    LocalRef {
        target: target.trim().to_string(),
        anchor,
        display,
    }
}
