//! Markdown-to-HTML rendering with the inline reference-macro hook.
//!
//! The renderer walks the mdast tree and emits plain HTML. Every `Text`
//! node is scanned for `@{...}` reference macros; each occurrence is
//! resolved through the cross-reference engine and spliced into the output
//! as a link. A macro that fails to resolve is logged and its body emitted
//! verbatim — the page renders degraded, never broken, and the batch keeps
//! going.

use docsite_core::parse::{ParseOptions, parse_mdast};
use docsite_core::xref::resolver::{ResolveContext, resolve};
use markdown::mdast::{AlignKind, Node};

use crate::error::BuildError;

/// Renders one markdown document to an HTML fragment.
///
/// `ctx` carries the document's category and the target domain; the
/// fragment is later wrapped by the page chrome.
pub fn render_document(source: &str, ctx: &ResolveContext<'_>) -> Result<String, BuildError> {
    let root = parse_mdast(source, &ParseOptions::document())?;
    let mut out = String::new();
    render_node(&root, ctx, &mut out);
    Ok(out)
}

fn render_children(nodes: &[Node], ctx: &ResolveContext<'_>, out: &mut String) {
    for node in nodes {
        render_node(node, ctx, out);
    }
}

fn render_node(node: &Node, ctx: &ResolveContext<'_>, out: &mut String) {
    match node {
        Node::Root(root) => render_children(&root.children, ctx, out),
        Node::Heading(heading) => {
            let depth = heading.depth.min(6);
            out.push_str(&format!("<h{depth}>"));
            render_children(&heading.children, ctx, out);
            out.push_str(&format!("</h{depth}>\n"));
        }
        Node::Paragraph(para) => {
            out.push_str("<p>");
            render_children(&para.children, ctx, out);
            out.push_str("</p>\n");
        }
        Node::Text(text) => splice_macros(&text.value, ctx, out),
        Node::InlineCode(code) => {
            out.push_str("<code>");
            out.push_str(&escape_text(&code.value));
            out.push_str("</code>");
        }
        Node::Code(code) => {
            match code.lang.as_deref() {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    escape_attr(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape_text(&code.value));
            out.push_str("</code></pre>\n");
        }
        Node::Emphasis(em) => {
            out.push_str("<em>");
            render_children(&em.children, ctx, out);
            out.push_str("</em>");
        }
        Node::Strong(strong) => {
            out.push_str("<strong>");
            render_children(&strong.children, ctx, out);
            out.push_str("</strong>");
        }
        Node::Delete(del) => {
            out.push_str("<del>");
            render_children(&del.children, ctx, out);
            out.push_str("</del>");
        }
        Node::Break(_) => out.push_str("<br />\n"),
        Node::Link(link) => {
            out.push_str(&format!("<a href=\"{}\"", escape_attr(&link.url)));
            if let Some(title) = &link.title {
                out.push_str(&format!(" title=\"{}\"", escape_attr(title)));
            }
            out.push('>');
            render_children(&link.children, ctx, out);
            out.push_str("</a>");
        }
        Node::Image(img) => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\"",
                escape_attr(&img.url),
                escape_attr(&img.alt)
            ));
            if let Some(title) = &img.title {
                out.push_str(&format!(" title=\"{}\"", escape_attr(title)));
            }
            out.push_str(" />");
        }
        Node::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            match list.start {
                Some(start) if list.ordered && start != 1 => {
                    out.push_str(&format!("<{tag} start=\"{start}\">\n"));
                }
                _ => out.push_str(&format!("<{tag}>\n")),
            }
            render_children(&list.children, ctx, out);
            out.push_str(&format!("</{tag}>\n"));
        }
        Node::ListItem(item) => {
            out.push_str("<li>");
            if let Some(checked) = item.checked {
                let checked_attr = if checked { " checked" } else { "" };
                out.push_str(&format!(
                    "<input type=\"checkbox\" disabled{checked_attr} /> "
                ));
            }
            render_children(&item.children, ctx, out);
            out.push_str("</li>\n");
        }
        Node::Blockquote(quote) => {
            out.push_str("<blockquote>\n");
            render_children(&quote.children, ctx, out);
            out.push_str("</blockquote>\n");
        }
        Node::ThematicBreak(_) => out.push_str("<hr />\n"),
        Node::Table(table) => render_table(table, ctx, out),
        Node::Html(html) => {
            out.push_str(&html.value);
            out.push('\n');
        }
        other => {
            log::warn!("Unhandled markdown node type: {:?}", other);
            if let Some(children) = other.children() {
                render_children(children, ctx, out);
            }
        }
    }
}

fn render_table(table: &markdown::mdast::Table, ctx: &ResolveContext<'_>, out: &mut String) {
    out.push_str("<table>\n");
    for (index, row) in table.children.iter().enumerate() {
        let Node::TableRow(row) = row else {
            continue;
        };
        let is_header = index == 0;
        if is_header {
            out.push_str("<thead>\n");
        } else if index == 1 {
            out.push_str("<tbody>\n");
        }
        out.push_str("<tr>");
        for (column, cell) in row.children.iter().enumerate() {
            let Node::TableCell(cell) = cell else {
                continue;
            };
            let tag = if is_header { "th" } else { "td" };
            let align = match table.align.get(column) {
                Some(AlignKind::Left) => " align=\"left\"",
                Some(AlignKind::Right) => " align=\"right\"",
                Some(AlignKind::Center) => " align=\"center\"",
                _ => "",
            };
            out.push_str(&format!("<{tag}{align}>"));
            render_children(&cell.children, ctx, out);
            out.push_str(&format!("</{tag}>"));
        }
        out.push_str("</tr>\n");
        if is_header {
            out.push_str("</thead>\n");
        }
    }
    if table.children.len() > 1 {
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
}

/// Scans a text span for `@{...}` macros and splices resolved links.
///
/// Text outside macros is HTML-escaped; a resolved label is already an HTML
/// fragment and is spliced as-is. Macro bodies run to the first `}` — bodies
/// never contain a closing brace.
fn splice_macros(text: &str, ctx: &ResolveContext<'_>, out: &mut String) {
    let mut rest = text;
    while let Some(start) = rest.find("@{") {
        let (before, tail) = rest.split_at(start);
        out.push_str(&escape_text(before));

        let body_and_beyond = &tail[2..];
        let Some(end) = body_and_beyond.find('}') else {
            // Unterminated macro: emit the remainder untouched.
            out.push_str(&escape_text(tail));
            return;
        };

        let body = &body_and_beyond[..end];
        match resolve(body, ctx) {
            Ok(link) => {
                out.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    escape_attr(&link.url),
                    link.label
                ));
            }
            Err(err) => {
                log::warn!("reference macro failed: {err}");
                out.push_str(&escape_text(&docsite_core::normalize_body(body)));
            }
        }

        rest = &body_and_beyond[end + 1..];
    }
    out.push_str(&escape_text(rest));
}

fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn ctx<'a>(root: &'a Path, category: &'a str) -> ResolveContext<'a> {
        ResolveContext {
            root,
            category,
            domain: "example.com",
        }
    }

    #[test]
    fn renders_heading_and_paragraph() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document("# Title\n\nHello *world*.\n", &ctx(dir.path(), "")).unwrap();
        insta::assert_snapshot!(html, @r###"
        <h1>Title</h1>
        <p>Hello <em>world</em>.</p>
        "###);
    }

    #[test]
    fn local_macro_becomes_link() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            &dir.path().join("quickstart/guide/basics.md"),
            "# Basics Overview\n",
        );

        let html = render_document(
            "See @{$guide/basics} for details.\n",
            &ctx(dir.path(), "quickstart"),
        )
        .unwrap();
        assert_eq!(
            html,
            "<p>See <a href=\"//example.com/quickstart/guide/basics.html\">Basics Overview</a> for details.</p>\n"
        );
    }

    #[test]
    fn symbol_macro_becomes_code_link() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document("Use @{tensorflow::Session} here.\n", &ctx(dir.path(), ""))
            .unwrap();
        assert_eq!(
            html,
            "<p>Use <a href=\"https://www.tensorflow.org/api_docs/cc/class/tensorflow/session\"><code>tensorflow::Session</code></a> here.</p>\n"
        );
    }

    #[test]
    fn unresolved_macro_preserves_body_text() {
        let dir = tempfile::tempdir().unwrap();
        let html =
            render_document("Broken: @{$missing/page}.\n", &ctx(dir.path(), "quickstart")).unwrap();
        assert_eq!(html, "<p>Broken: $missing/page.</p>\n");
    }

    #[test]
    fn multiple_macros_in_one_text_node() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.md"), "# A\n");
        touch(&dir.path().join("b.md"), "# B\n");

        let html = render_document("@{$a} and @{$b}\n", &ctx(dir.path(), "")).unwrap();
        assert_eq!(
            html,
            "<p><a href=\"//example.com/a.html\">A</a> and <a href=\"//example.com/b.html\">B</a></p>\n"
        );
    }

    #[test]
    fn macro_inside_code_span_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document("`@{$not/a/ref}`\n", &ctx(dir.path(), "")).unwrap();
        assert_eq!(html, "<p><code>@{$not/a/ref}</code></p>\n");
    }

    #[test]
    fn plain_text_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document("a < b & c\n", &ctx(dir.path(), "")).unwrap();
        assert_eq!(html, "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn unterminated_macro_left_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document("oops @{$never closed\n", &ctx(dir.path(), "")).unwrap();
        assert_eq!(html, "<p>oops @{$never closed</p>\n");
    }

    #[test]
    fn code_fence_with_language() {
        let dir = tempfile::tempdir().unwrap();
        let html =
            render_document("```python\nprint(1 < 2)\n```\n", &ctx(dir.path(), "")).unwrap();
        assert_eq!(
            html,
            "<pre><code class=\"language-python\">print(1 &lt; 2)</code></pre>\n"
        );
    }

    #[test]
    fn raw_html_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document("<div class=\"note\">hi</div>\n", &ctx(dir.path(), "")).unwrap();
        assert_eq!(html, "<div class=\"note\">hi</div>\n");
    }

    #[test]
    fn gfm_table_renders() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_document(
            "| a | b |\n| :- | -: |\n| 1 | 2 |\n",
            &ctx(dir.path(), ""),
        )
        .unwrap();
        assert!(html.contains("<th align=\"left\">a</th>"));
        assert!(html.contains("<td align=\"right\">2</td>"));
    }
}
