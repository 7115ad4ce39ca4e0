//! docsite-parity - structural comparison between two documentation trees.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use docsite_html::compare_trees;

#[derive(Parser)]
#[command(name = "docsite-parity")]
#[command(version)]
#[command(about = "Report structural differences between two documentation trees")]
struct Cli {
    /// First documentation tree (e.g. the translated copy)
    left: PathBuf,

    /// Second documentation tree (e.g. the original copy)
    right: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    compare_trees(&cli.left, &cli.right, &mut out)?;
    out.flush()?;
    Ok(())
}
