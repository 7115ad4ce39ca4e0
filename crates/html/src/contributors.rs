//! Contributor credits for the page footer.
//!
//! Each rendered document gets a footer listing the people who touched its
//! source file, fetched from the repository host's commit API. One lookup
//! per document, no cache, no retry: a failed call is an environment
//! problem (credential or connectivity) and is fatal for that document's
//! render.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::BuildError;

const USER_AGENT: &str = concat!("docsite/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// A commit author credited in the footer.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Contributor {
    /// Account login.
    pub login: String,
    /// Profile URL.
    pub html_url: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    // Commits whose author has no account come back with `author: null`.
    author: Option<Contributor>,
}

/// Blocking client for the commit-listing API.
pub struct ContributorClient {
    http: reqwest::blocking::Client,
    api_base: String,
    repo: String,
    token: String,
}

impl ContributorClient {
    /// Creates a client for `{api_base}/repos/{repo}`, reading the bearer
    /// token from `token_file`.
    pub fn new(api_base: &str, repo: &str, token_file: &Path) -> Result<Self, BuildError> {
        let token = fs::read_to_string(token_file)?.trim().to_string();
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
            token,
        })
    }

    /// Lists the contributors for one source document, in first-commit-seen
    /// order, deduplicated by login.
    ///
    /// Pages through the commit list until a short page signals the end.
    pub fn for_document(&self, rel_path: &str) -> Result<Vec<Contributor>, BuildError> {
        let url = format!("{}/repos/{}/commits", self.api_base, self.repo);
        let mut contributors = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("path", rel_path),
                    ("per_page", &PER_PAGE.to_string()),
                    ("page", &page.to_string()),
                ])
                .header("Accept", "application/vnd.github.v3+json")
                .header("Authorization", format!("Bearer {}", self.token))
                .send()?;

            if !response.status().is_success() {
                return Err(BuildError::ContributorStatus {
                    status: response.status().as_u16(),
                    path: rel_path.to_string(),
                });
            }

            let entries: Vec<CommitEntry> = response.json()?;
            let last_page = entries.len() < PER_PAGE;
            absorb(entries, &mut contributors);
            if last_page {
                return Ok(contributors);
            }
            page += 1;
        }
    }
}

fn absorb(entries: Vec<CommitEntry>, into: &mut Vec<Contributor>) {
    for entry in entries {
        if let Some(author) = entry.author
            && !into.iter().any(|c| c.login == author.login)
        {
            into.push(author);
        }
    }
}

/// Renders the footer credits fragment; empty input yields an empty string.
pub fn credits_html(contributors: &[Contributor]) -> String {
    if contributors.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"contributors\">\n");
    for contributor in contributors {
        html.push_str(&format!(
            "<a class=\"contributor\" href=\"{}\"><img src=\"{}\" alt=\"{}\" />{}</a>\n",
            html_escape::encode_double_quoted_attribute(&contributor.html_url),
            html_escape::encode_double_quoted_attribute(&contributor.avatar_url),
            html_escape::encode_double_quoted_attribute(&contributor.login),
            html_escape::encode_text(&contributor.login),
        ));
    }
    html.push_str("</div>");
    html
}
