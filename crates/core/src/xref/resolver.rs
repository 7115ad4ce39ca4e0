//! Resolution orchestration.
//!
//! Strategies are ordered cheapest and most specific first: most references
//! point at siblings in the same category, so direct path candidates are
//! probed before the O(tree) search, and the hand-authored override table is
//! the very last resort.

use std::path::Path;

use crate::error::DocsiteError;
use crate::title;
use crate::xref::{
    LocalRef, Reference, ResolvedLink, classify, external, normalize_body, overrides, probe,
    search,
};

/// Immutable context for one document's reference resolution.
///
/// Passed into every call rather than held as shared state, so resolution
/// for a document depends only on its own inputs.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    /// Root of the read-only source tree.
    pub root: &'a Path,
    /// The document's containing directory name; empty for root-level
    /// documents. Doubles as the resolution namespace for sibling targets.
    pub category: &'a str,
    /// Target domain for domain-relative output URLs.
    pub domain: &'a str,
}

/// Resolves a raw macro body to a URL plus display label.
///
/// Symbol references resolve without touching the filesystem. Local
/// references walk the candidate chain: direct path probes, tree search,
/// override table. On total exhaustion the error carries the normalized
/// body so the caller can log it and splice the original text back into the
/// output.
pub fn resolve(body: &str, ctx: &ResolveContext<'_>) -> Result<ResolvedLink, DocsiteError> {
    let body = normalize_body(body);
    match classify(&body) {
        Reference::CppSymbol(symbol) => Ok(external::cpp_symbol_link(&symbol)),
        Reference::PySymbol(symbol) => Ok(external::py_symbol_link(&symbol)),
        Reference::Local(local) => resolve_local(&body, &local, ctx),
    }
}

fn resolve_local(
    raw: &str,
    local: &LocalRef,
    ctx: &ResolveContext<'_>,
) -> Result<ResolvedLink, DocsiteError> {
    let target = strip_self_prefix(&local.target, ctx.category);
    let candidates = candidate_paths(target, ctx.category, local.display.is_some());

    if let Some(doc) = first_existing(ctx.root, &candidates) {
        return linked(doc, local, ctx);
    }

    if let Some(found) = search::find(last_component(target), ctx.root) {
        log::debug!("reference {raw:?} found by tree search at {found}");
        return linked(&found, local, ctx);
    }

    if let Some((url, name)) = overrides::lookup(&local.target) {
        let label = match &local.display {
            Some(display) => escape(display),
            None => escape(name),
        };
        return Ok(ResolvedLink {
            url: url.to_string(),
            label,
        });
    }

    Err(DocsiteError::UnresolvedReference(raw.to_string()))
}

/// Builds the ordered direct-probe candidate list for a local target.
///
/// Sibling candidates (inside the category) come before bare ones; the
/// `/index` variants cover directory-style references. Duplicates are
/// collapsed keeping the first position, so each path is probed at most
/// once.
fn candidate_paths(target: &str, category: &str, explicit_display: bool) -> Vec<String> {
    let mut candidates = Vec::new();
    push_unique(&mut candidates, in_category(category, target));
    push_unique(&mut candidates, target.to_string());
    if !explicit_display {
        push_unique(&mut candidates, format!("{target}/index"));
        push_unique(
            &mut candidates,
            format!("{}/index", in_category(category, target)),
        );
    }
    candidates
}

fn push_unique(candidates: &mut Vec<String>, candidate: String) {
    if !candidate.is_empty() && !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

/// First candidate whose source document exists, probed in order.
fn first_existing<'a>(root: &Path, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .find(|doc| probe::document_exists(root, doc))
}

/// Strips at most one leading `{category}/` self-prefix from a target.
///
/// Authors sometimes write `$category/page` from inside `category`; the
/// prefix would otherwise double up when the sibling candidate is built.
/// Only the first occurrence is stripped so a target that legitimately
/// repeats the category name deeper in its path survives the round-trip.
fn strip_self_prefix<'a>(target: &'a str, category: &str) -> &'a str {
    if category.is_empty() {
        return target;
    }
    match target.strip_prefix(category) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(target),
        None => target,
    }
}

fn in_category(category: &str, target: &str) -> String {
    if category.is_empty() {
        target.to_string()
    } else {
        format!("{category}/{target}")
    }
}

fn last_component(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

/// Finishes resolution for an identified target document.
fn linked(
    doc: &str,
    local: &LocalRef,
    ctx: &ResolveContext<'_>,
) -> Result<ResolvedLink, DocsiteError> {
    let label = match &local.display {
        Some(display) => escape(display),
        None => escape(&title::document_title(&probe::source_path(ctx.root, doc))?),
    };

    let mut url = format!("//{}/{}.html", ctx.domain, doc);
    if let Some(anchor) = &local.anchor {
        url.push('#');
        url.push_str(anchor);
    }

    Ok(ResolvedLink { url, label })
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
