//! Site build driver: configuration, tree walk, and output mirroring.
//!
//! One synchronous pass over the source tree. Markdown files go through
//! parse → render → chrome into mirrored `.html` files; every other file is
//! byte-copied (images keep their extension); the asset directory is copied
//! verbatim at the end. Each document is processed independently: a failed
//! document is logged and counted, the batch always runs to completion.

use std::fs;
use std::path::{Component, Path, PathBuf};

use docsite_core::title::extract_title;
use docsite_core::xref::resolver::ResolveContext;
use docsite_core::DocsiteError;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::chrome::{MANIFEST_FILE, PageChrome, PageParts, left_nav_json};
use crate::contributors::{ContributorClient, credits_html};
use crate::error::BuildError;
use crate::render::render_document;

/// Entries never mirrored into the output tree.
const SKIPPED_FILES: &[&str] = &[MANIFEST_FILE, "README.md", "README.txt"];

/// Build configuration, read from `docsite.toml`.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Root of the localized source tree.
    pub source_root: PathBuf,
    /// Root of the generated output tree.
    pub out_root: PathBuf,
    /// Path to the HTML page template.
    pub template: PathBuf,
    /// Optional asset directory copied verbatim into the output root.
    pub assets: Option<PathBuf>,
    /// Optional contributor-credits configuration; absent means empty
    /// footers.
    pub contributors: Option<ContributorsConfig>,
}

/// Configuration for the contributor-credits lookups.
#[derive(Debug, Deserialize)]
pub struct ContributorsConfig {
    /// Repository in `owner/name` form.
    pub repo: String,
    /// File holding the bearer token.
    pub token_file: PathBuf,
    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

impl SiteConfig {
    /// Loads the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }
}

/// Counters for one full build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Markdown documents rendered to HTML.
    pub rendered: usize,
    /// Non-markdown files byte-copied.
    pub copied: usize,
    /// Documents whose render failed (logged, batch continued).
    pub failed: usize,
}

/// Runs one full site build.
pub fn build_site(config: &SiteConfig, domain: &str) -> Result<BuildStats, BuildError> {
    let chrome = PageChrome::load(&config.template)?;
    let client = match &config.contributors {
        Some(c) => Some(ContributorClient::new(&c.api_base, &c.repo, &c.token_file)?),
        None => None,
    };

    let mut stats = BuildStats::default();

    for entry in WalkDir::new(&config.source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let rel = entry
            .path()
            .strip_prefix(&config.source_root)
            .expect("walked entries live below the source root");
        if is_skipped(rel) {
            continue;
        }

        let out_path = config.out_root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if entry.path().extension().and_then(|e| e.to_str()) == Some("md") {
            match render_page(entry.path(), rel, config, domain, &chrome, client.as_ref()) {
                Ok(html) => {
                    fs::write(out_path.with_extension("html"), html)?;
                    stats.rendered += 1;
                }
                Err(err) => {
                    log::error!("failed to render {}: {err}", rel.display());
                    stats.failed += 1;
                }
            }
        } else {
            fs::copy(entry.path(), &out_path)?;
            stats.copied += 1;
        }
    }

    if let Some(assets) = &config.assets {
        copy_tree(assets, &config.out_root)?;
    }

    Ok(stats)
}

fn is_skipped(rel: &Path) -> bool {
    if rel
        .components()
        .any(|c| c.as_os_str().to_str() == Some(".git"))
    {
        return true;
    }
    match rel.file_name().and_then(|n| n.to_str()) {
        Some(name) => SKIPPED_FILES.contains(&name),
        None => false,
    }
}

/// Renders one markdown document into a finished page.
fn render_page(
    source_path: &Path,
    rel: &Path,
    config: &SiteConfig,
    domain: &str,
    chrome: &PageChrome,
    client: Option<&ContributorClient>,
) -> Result<String, BuildError> {
    let source = fs::read_to_string(source_path)?;
    let category = category_of(rel);

    let title = extract_title(&source).map_err(|err| match err {
        DocsiteError::MissingTitle(_) => DocsiteError::MissingTitle(source_path.to_path_buf()),
        other => other,
    })?;

    let ctx = ResolveContext {
        root: &config.source_root,
        category,
        domain,
    };
    let content = render_document(&source, &ctx)?;
    let left_nav = left_nav_json(&config.source_root, category, domain)?;

    let contributors = match client {
        Some(client) => {
            let rel_str = rel_to_slash(rel);
            credits_html(&client.for_document(&rel_str)?)
        }
        None => String::new(),
    };

    Ok(chrome.render_page(&PageParts {
        title: &title,
        content: &content,
        left_nav: &left_nav,
        contributors: &contributors,
    }))
}

/// The document's containing directory name; empty for root-level files.
fn category_of(rel: &Path) -> &str {
    rel.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("")
}

fn rel_to_slash(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Copies a directory tree verbatim under the output root, keeping the
/// source directory's own name as the top-level entry.
fn copy_tree(source: &Path, out_root: &Path) -> Result<(), BuildError> {
    let dir_name = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));

    for entry in WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let rel = entry
            .path()
            .strip_prefix(source)
            .expect("walked entries live below the asset root");
        let target = out_root.join(&dir_name).join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn template(dir: &Path) -> PathBuf {
        let path = dir.join("template.html");
        fs::write(
            &path,
            "<title>{title}</title><script>var nav = {left_nav};</script>\n{content}\n<footer>{contributors}</footer>",
        )
        .unwrap();
        path
    }

    fn config(dir: &Path) -> SiteConfig {
        SiteConfig {
            source_root: dir.join("src"),
            out_root: dir.join("out"),
            template: template(dir),
            assets: None,
            contributors: None,
        }
    }

    #[test]
    fn loads_minimal_toml() {
        let config: SiteConfig = toml::from_str(
            "source_root = \"docs\"\nout_root = \"out\"\ntemplate = \"template.html\"\n",
        )
        .unwrap();
        assert_eq!(config.source_root, PathBuf::from("docs"));
        assert!(config.contributors.is_none());
    }

    #[test]
    fn contributors_config_defaults_api_base() {
        let config: SiteConfig = toml::from_str(
            "source_root = \"docs\"\nout_root = \"out\"\ntemplate = \"t.html\"\n\n[contributors]\nrepo = \"org/docs\"\ntoken_file = \".token\"\n",
        )
        .unwrap();
        let contributors = config.contributors.unwrap();
        assert_eq!(contributors.api_base, "https://api.github.com");
    }

    #[test]
    fn builds_mirrored_tree() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            &dir.path().join("src/quickstart/basics.md"),
            "# Basics Overview\n\nSee @{$basics}.\n",
        );
        touch(&dir.path().join("src/images/logo.png"), "png-bytes");

        let stats = build_site(&config(dir.path()), "example.com").unwrap();
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.copied, 1);
        assert_eq!(stats.failed, 0);

        let page = fs::read_to_string(dir.path().join("out/quickstart/basics.html")).unwrap();
        assert!(page.contains("<title>Basics Overview</title>"));
        assert!(page.contains("<a href=\"//example.com/quickstart/basics.html\">Basics Overview</a>"));
        assert!(fs::metadata(dir.path().join("out/images/logo.png")).is_ok());
    }

    #[test]
    fn failed_document_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/a/untitled.md"), "no heading\n");
        touch(&dir.path().join("src/b/good.md"), "# Good\n");

        let stats = build_site(&config(dir.path()), "example.com").unwrap();
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.failed, 1);
        assert!(fs::metadata(dir.path().join("out/b/good.html")).is_ok());
        assert!(fs::metadata(dir.path().join("out/a/untitled.html")).is_err());
    }

    #[test]
    fn manifest_and_readme_not_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/guide/page.md"), "# Page\n");
        touch(&dir.path().join("src/guide/leftnav_files"), "page\n");
        touch(&dir.path().join("src/README.md"), "# Repo readme\n");

        build_site(&config(dir.path()), "example.com").unwrap();
        assert!(fs::metadata(dir.path().join("out/guide/leftnav_files")).is_err());
        assert!(fs::metadata(dir.path().join("out/README.html")).is_err());
        assert!(fs::metadata(dir.path().join("out/README.md")).is_err());
    }

    #[test]
    fn left_nav_injected_for_category_pages() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/guide/page.md"), "# Page\n");
        touch(&dir.path().join("src/guide/leftnav_files"), "page\n");

        build_site(&config(dir.path()), "example.com").unwrap();
        let page = fs::read_to_string(dir.path().join("out/guide/page.html")).unwrap();
        assert!(page.contains(
            r#"var nav = [{"type":"child","title":"Page","link":"//example.com/guide/page.html"}];"#
        ));
    }

    #[test]
    fn assets_copied_verbatim_after_build() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/index.md"), "# Home\n");
        touch(&dir.path().join("assets/js/main.js"), "console.log(1);\n");

        let mut config = config(dir.path());
        config.assets = Some(dir.path().join("assets"));
        build_site(&config, "example.com").unwrap();

        let copied = fs::read_to_string(dir.path().join("out/assets/js/main.js")).unwrap();
        assert_eq!(copied, "console.log(1);\n");
    }
}
