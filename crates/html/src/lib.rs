#![deny(missing_docs)]
//! docsite HTML layer: markdown rendering with reference-macro resolution,
//! page chrome assembly, contributor credits, the site build driver, and
//! the structural parity checker.

/// Page chrome: template substitution and left-nav JSON.
pub mod chrome;
/// Contributor credits client and footer rendering.
pub mod contributors;
/// Build error types.
pub mod error;
/// Structural parity check between two documentation trees.
pub mod parity;
/// Markdown-to-HTML rendering with the macro hook.
pub mod render;
/// Site build driver and configuration.
pub mod site;

pub use chrome::{PageChrome, PageParts, left_nav_json};
pub use contributors::{Contributor, ContributorClient, credits_html};
pub use error::BuildError;
pub use parity::compare_trees;
pub use render::render_document;
pub use site::{BuildStats, ContributorsConfig, SiteConfig, build_site};
