//! Markdown parsing utilities.

use crate::{DocsiteError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Allow raw HTML nodes in the AST.
    pub raw_html: bool,
}

impl ParseOptions {
    /// Defaults for documentation pages: GFM on, raw HTML passed through.
    ///
    /// Docs sources embed literal HTML (tables, anchors, video tags), so
    /// `html_flow`/`html_text` stay enabled and the renderer emits those
    /// nodes verbatim.
    pub const fn document() -> Self {
        Self {
            gfm: true,
            code_indented: true,
            raw_html: true,
        }
    }

    /// Strict defaults: GFM only, raw HTML dropped by the parser.
    pub const fn strict() -> Self {
        Self {
            gfm: true,
            code_indented: true,
            raw_html: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::document()
    }
}

/// Parse markdown into an MDAST tree using core options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, DocsiteError> {
    parse_mdast_with_options(input, &options.to_markdown())
}

/// Parse markdown into an MDAST tree using markdown-rs `ParseOptions`.
pub fn parse_mdast_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, DocsiteError> {
    markdown::to_mdast(input, options).map_err(|err| DocsiteError::MarkdownAdapter {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_markdown() {
        let root = parse_mdast("# Title\n\nBody text.", &ParseOptions::document())
            .expect("parse should succeed");
        assert!(matches!(root, Node::Root(_)));
    }

    #[test]
    fn gfm_tables_enabled() {
        let root = parse_mdast(
            "| a | b |\n| - | - |\n| 1 | 2 |\n",
            &ParseOptions::document(),
        )
        .expect("parse should succeed");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert!(
            root.children
                .iter()
                .any(|n| matches!(n, Node::Table(_)))
        );
    }

    #[test]
    fn raw_html_kept_in_document_mode() {
        let root = parse_mdast("<div class=\"x\">hi</div>", &ParseOptions::document())
            .expect("parse should succeed");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert!(root.children.iter().any(|n| matches!(n, Node::Html(_))));
    }
}
