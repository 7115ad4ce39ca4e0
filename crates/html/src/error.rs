use docsite_core::DocsiteError;
use thiserror::Error;

/// Errors that can occur while building the site.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Error from the core parsing/resolution layer.
    #[error(transparent)]
    Core(#[from] DocsiteError),
    /// IO error while walking, reading, or writing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Transport error during a contributor lookup.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status from the contributor API.
    #[error("contributor lookup for {path} failed with status {status}")]
    ContributorStatus {
        /// HTTP status code returned by the API
        status: u16,
        /// Document path the lookup was for
        path: String,
    },
    /// Malformed build configuration file.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
