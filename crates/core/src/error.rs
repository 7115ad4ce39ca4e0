use std::path::PathBuf;

use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while generating the documentation site.
#[derive(Debug, Error)]
pub enum DocsiteError {
    /// IO error while reading a source document or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// A rendered or referenced document has no level-1 heading.
    ///
    /// Every document in the corpus must open with a `# Title`; the title is
    /// the page `<title>` and the default link text for references pointing
    /// at it. A missing title is a structural defect in the corpus and is
    /// fatal for the document that violates it.
    #[error("document {0} has no level-1 heading")]
    MissingTitle(PathBuf),
    /// A reference macro exhausted every resolution strategy.
    ///
    /// Non-fatal at the batch level: the renderer catches this at the
    /// per-macro boundary, logs the body, and emits it verbatim.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),
}

impl DocsiteError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::MarkdownAdapter {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}
