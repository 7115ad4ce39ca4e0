//! docsite CLI - build the localized documentation site.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use docsite_html::{SiteConfig, build_site};

#[derive(Parser)]
#[command(name = "docsite")]
#[command(version)]
#[command(about = "Localized documentation site generator", long_about = None)]
struct Cli {
    /// Target domain used to build domain-relative links (e.g. docs.example.com)
    domain: String,

    /// Path to the build configuration file
    #[arg(long, default_value = "docsite.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SiteConfig::load(&cli.config)?;
    let stats = build_site(&config, &cli.domain)?;

    if stats.failed > 0 {
        log::warn!("{} document(s) failed to render", stats.failed);
    }
    println!(
        "rendered {} pages, copied {} files, {} failed",
        stats.rendered, stats.copied, stats.failed
    );
    Ok(())
}
