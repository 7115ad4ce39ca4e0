#![deny(missing_docs)]
//! docsite core: markdown parsing utilities, title extraction, navigation
//! manifests, and the cross-reference resolution engine.

/// Core error types.
pub mod error;
/// Navigation manifest (`leftnav_files`) parsing.
pub mod nav;
/// Markdown parsing utilities.
pub mod parse;
/// Title extraction and heading outlines.
pub mod title;
/// Cross-reference macro engine.
pub mod xref;

pub use error::{DocsiteError, SourceLocation};
pub use nav::{ManifestEntry, ManifestLeaf, parse_manifest};
pub use parse::{ParseOptions, parse_mdast, parse_mdast_with_options};
pub use title::{document_title, extract_text_from_nodes, extract_title, heading_outline};
pub use xref::resolver::{ResolveContext, resolve};
pub use xref::{LocalRef, Reference, ResolvedLink, classify, normalize_body};
