//! Page chrome assembly: template substitution and left-nav JSON.
//!
//! The HTML template carries `{title}`, `{content}`, `{left_nav}` and
//! `{contributors}` placeholders. The left nav is serialized as a JSON
//! array consumed by the page script: leaves render as
//! `{"type":"child","title":…,"link":…}`, groups as
//! `{"type":"parent","title":…,"sub_class":[…]}`. A category without a
//! manifest gets `null` and the script skips the nav entirely.

use std::fs;
use std::path::Path;

use docsite_core::nav::{ManifestEntry, parse_manifest};
use docsite_core::title::document_title;
use serde::Serialize;

use crate::error::BuildError;

/// Name of the per-category navigation manifest file.
pub const MANIFEST_FILE: &str = "leftnav_files";

/// Loaded page template with placeholder substitution.
pub struct PageChrome {
    template: String,
}

/// The per-page values substituted into the template.
pub struct PageParts<'a> {
    /// Page title (the document's level-1 heading text).
    pub title: &'a str,
    /// Rendered HTML body fragment.
    pub content: &'a str,
    /// Left-nav JSON payload (`null` when the category has no manifest).
    pub left_nav: &'a str,
    /// Footer contributor-credits HTML fragment (may be empty).
    pub contributors: &'a str,
}

impl PageChrome {
    /// Reads the template file once for the whole build.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        Ok(Self {
            template: fs::read_to_string(path)?,
        })
    }

    /// Builds a chrome from an in-memory template.
    pub fn from_template(template: String) -> Self {
        Self { template }
    }

    /// Substitutes the page values into the template.
    pub fn render_page(&self, parts: &PageParts<'_>) -> String {
        self.template
            .replace("{title}", parts.title)
            .replace("{content}", parts.content)
            .replace("{left_nav}", parts.left_nav)
            .replace("{contributors}", parts.contributors)
    }
}

/// One node of the serialized navigation tree.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum NavNode {
    #[serde(rename = "child")]
    Child { title: String, link: String },
    #[serde(rename = "parent")]
    Parent {
        title: String,
        sub_class: Vec<NavChild>,
    },
}

#[derive(Debug, Serialize)]
struct NavChild {
    title: String,
    link: String,
}

/// Assembles the left-nav JSON for one category.
///
/// Returns `"null"` when the category carries no manifest. Leaf titles come
/// from the manifest's explicit `{file}:{title}` form when present,
/// otherwise from the target document's level-1 heading; a manifest entry
/// pointing at a document without one is a corpus defect and fails the
/// page.
pub fn left_nav_json(root: &Path, category: &str, domain: &str) -> Result<String, BuildError> {
    let manifest_path = if category.is_empty() {
        root.join(MANIFEST_FILE)
    } else {
        root.join(category).join(MANIFEST_FILE)
    };
    if !manifest_path.is_file() {
        return Ok("null".to_string());
    }

    let manifest = fs::read_to_string(&manifest_path)?;
    let mut nodes = Vec::new();
    for entry in parse_manifest(&manifest) {
        match entry {
            ManifestEntry::Leaf(leaf) => {
                let (title, link) = resolve_leaf(root, category, domain, &leaf.link, leaf.title)?;
                nodes.push(NavNode::Child { title, link });
            }
            ManifestEntry::Group { title, leaves } => {
                let mut sub_class = Vec::new();
                for leaf in leaves {
                    let (title, link) =
                        resolve_leaf(root, category, domain, &leaf.link, leaf.title)?;
                    sub_class.push(NavChild { title, link });
                }
                nodes.push(NavNode::Parent { title, sub_class });
            }
        }
    }

    Ok(serde_json::to_string(&nodes).expect("nav nodes serialize to JSON"))
}

fn resolve_leaf(
    root: &Path,
    category: &str,
    domain: &str,
    link: &str,
    explicit_title: Option<String>,
) -> Result<(String, String), BuildError> {
    let doc = if category.is_empty() {
        link.to_string()
    } else {
        format!("{category}/{link}")
    };
    let title = match explicit_title {
        Some(title) => title,
        None => document_title(&root.join(format!("{doc}.md")))?,
    };
    Ok((title, format!("//{domain}/{doc}.html")))
}
