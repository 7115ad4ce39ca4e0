//! Title extraction and heading outlines.
//!
//! Every documentation page opens with a single level-1 heading; that text is
//! both the page title and the default display text for cross-references
//! pointing at the page. The heading outline (ordered `(depth, text)` pairs)
//! feeds the structural parity checker.

use std::fs;
use std::path::Path;

use markdown::mdast::Node;

use crate::error::DocsiteError;
use crate::parse::{ParseOptions, parse_mdast};

/// Extracts plain text from a list of AST nodes (for heading text).
///
/// Recursively collects text content from phrasing nodes, ignoring
/// node types that cannot appear meaningfully inside a heading.
pub fn extract_text_from_nodes(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        extract_text_from_node(node, &mut text);
    }
    text.trim().to_string()
}

fn extract_text_from_node(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(t) => buffer.push_str(&t.value),
        Node::InlineCode(code) => buffer.push_str(&code.value),
        Node::Strong(strong) => {
            for child in &strong.children {
                extract_text_from_node(child, buffer);
            }
        }
        Node::Emphasis(emphasis) => {
            for child in &emphasis.children {
                extract_text_from_node(child, buffer);
            }
        }
        Node::Link(link) => {
            for child in &link.children {
                extract_text_from_node(child, buffer);
            }
        }
        Node::Delete(del) => {
            for child in &del.children {
                extract_text_from_node(child, buffer);
            }
        }
        // Ignore other node types in headings
        _ => {}
    }
}

/// Returns the text of the first level-1 heading in the document.
///
/// Errors with [`DocsiteError::MissingTitle`] when the document has no `h1`;
/// the reported path is empty here, callers that know the source path attach
/// it via [`document_title`].
pub fn extract_title(source: &str) -> Result<String, DocsiteError> {
    for (depth, text) in heading_outline(source)? {
        if depth == 1 {
            return Ok(text);
        }
    }
    Err(DocsiteError::MissingTitle(Default::default()))
}

/// Reads a source document and extracts its title.
pub fn document_title(path: &Path) -> Result<String, DocsiteError> {
    let source = fs::read_to_string(path)?;
    extract_title(&source).map_err(|err| match err {
        DocsiteError::MissingTitle(_) => DocsiteError::MissingTitle(path.to_path_buf()),
        other => other,
    })
}

/// Returns the ordered `(depth, text)` sequence of every heading.
pub fn heading_outline(source: &str) -> Result<Vec<(u8, String)>, DocsiteError> {
    let root = parse_mdast(source, &ParseOptions::document())?;
    let mut outline = Vec::new();
    collect_headings(&root, &mut outline);
    Ok(outline)
}

fn collect_headings(node: &Node, outline: &mut Vec<(u8, String)>) {
    if let Node::Heading(heading) = node {
        outline.push((heading.depth, extract_text_from_nodes(&heading.children)));
        return;
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_headings(child, outline);
        }
    }
}
