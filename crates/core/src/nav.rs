//! Navigation manifest (`leftnav_files`) parsing.
//!
//! Each category directory may carry a `leftnav_files` manifest describing
//! the left navigation for its pages. The format is line-oriented:
//!
//! ```text
//! get_started
//! install:Installing
//!
//! ### Tutorials
//! mnist
//! word2vec
//! >>>
//! ```
//!
//! A line starting with `###` opens a named parent group (the group title
//! follows on the same line). A blank line or a line consisting solely of
//! `>>>` closes the current group. Every other non-blank line is either
//! `{file}` or `{file}:{display title}`; the colon form supplies an explicit
//! title so the target document's heading is not consulted.
//!
//! Grouping is a single level deep and entries preserve manifest order.

/// A single navigation link: a document name plus an optional explicit title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestLeaf {
    /// Document name relative to the category directory, without extension.
    pub link: String,
    /// Explicit display title from the `{file}:{title}` form.
    pub title: Option<String>,
}

/// One ordered entry of a navigation manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestEntry {
    /// A top-level link.
    Leaf(ManifestLeaf),
    /// A named group of links.
    Group {
        /// Group title from the `### Title` line.
        title: String,
        /// Links listed under the group, in manifest order.
        leaves: Vec<ManifestLeaf>,
    },
}

/// Parses a `leftnav_files` manifest into its ordered entries.
pub fn parse_manifest(input: &str) -> Vec<ManifestEntry> {
    let mut entries = Vec::new();
    let mut open_group: Option<(String, Vec<ManifestLeaf>)> = None;

    for line in input.lines() {
        let line = line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed == ">>>" {
            if let Some((title, leaves)) = open_group.take() {
                entries.push(ManifestEntry::Group { title, leaves });
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("###") {
            // A new group header also closes any group still open.
            if let Some((title, leaves)) = open_group.take() {
                entries.push(ManifestEntry::Group { title, leaves });
            }
            open_group = Some((rest.trim().to_string(), Vec::new()));
            continue;
        }

        let leaf = parse_leaf(trimmed);
        match open_group.as_mut() {
            Some((_, leaves)) => leaves.push(leaf),
            None => entries.push(ManifestEntry::Leaf(leaf)),
        }
    }

    if let Some((title, leaves)) = open_group.take() {
        entries.push(ManifestEntry::Group { title, leaves });
    }

    entries
}

fn parse_leaf(line: &str) -> ManifestLeaf {
    match line.split_once(':') {
        Some((link, title)) => ManifestLeaf {
            link: link.trim().to_string(),
            title: Some(title.trim().to_string()),
        },
        None => ManifestLeaf {
            link: line.to_string(),
            title: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(link: &str) -> ManifestLeaf {
        ManifestLeaf {
            link: link.to_string(),
            title: None,
        }
    }

    #[test]
    fn plain_links_stay_top_level() {
        let entries = parse_manifest("index\nget_started\n");
        assert_eq!(
            entries,
            vec![
                ManifestEntry::Leaf(leaf("index")),
                ManifestEntry::Leaf(leaf("get_started")),
            ]
        );
    }

    #[test]
    fn colon_form_supplies_title() {
        let entries = parse_manifest("install:Installing TensorFlow\n");
        assert_eq!(
            entries,
            vec![ManifestEntry::Leaf(ManifestLeaf {
                link: "install".to_string(),
                title: Some("Installing TensorFlow".to_string()),
            })]
        );
    }

    #[test]
    fn group_collects_until_terminator() {
        let entries = parse_manifest("### Tutorials\nmnist\nword2vec\n>>>\nindex\n");
        assert_eq!(
            entries,
            vec![
                ManifestEntry::Group {
                    title: "Tutorials".to_string(),
                    leaves: vec![leaf("mnist"), leaf("word2vec")],
                },
                ManifestEntry::Leaf(leaf("index")),
            ]
        );
    }

    #[test]
    fn blank_line_closes_group() {
        let entries = parse_manifest("### Guides\na\n\nb\n");
        assert_eq!(
            entries,
            vec![
                ManifestEntry::Group {
                    title: "Guides".to_string(),
                    leaves: vec![leaf("a")],
                },
                ManifestEntry::Leaf(leaf("b")),
            ]
        );
    }

    #[test]
    fn consecutive_group_headers() {
        let entries = parse_manifest("### One\na\n### Two\nb\n");
        assert_eq!(
            entries,
            vec![
                ManifestEntry::Group {
                    title: "One".to_string(),
                    leaves: vec![leaf("a")],
                },
                ManifestEntry::Group {
                    title: "Two".to_string(),
                    leaves: vec![leaf("b")],
                },
            ]
        );
    }

    #[test]
    fn unterminated_group_closed_at_eof() {
        let entries = parse_manifest("### Tail\nx");
        assert_eq!(
            entries,
            vec![ManifestEntry::Group {
                title: "Tail".to_string(),
                leaves: vec![leaf("x")],
            }]
        );
    }

    #[test]
    fn empty_manifest_yields_no_entries() {
        assert!(parse_manifest("").is_empty());
        assert!(parse_manifest("\n\n").is_empty());
    }
}
