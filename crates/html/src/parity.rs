//! Structural parity check between two localized documentation trees.
//!
//! A translated tree must mirror the original structurally: same files,
//! same number of headings per level in each file. The checker walks both
//! trees in lock-step and reports every discrepancy to the output stream.
//! It is a pure reporting tool: findings never fail the run.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use docsite_core::title::heading_outline;

/// Entry names excluded from the comparison.
const IGNORED: &[&str] = &["images", ".git", "README.md", ".DS_Store"];

/// Heading levels compared per common file.
const COMPARED_LEVELS: u8 = 4;

/// Recursively compares two documentation trees, writing findings to `out`.
///
/// Filenames present on only one side are reported without any heading
/// comparison; files present on both sides are parsed into heading outlines
/// and per-level count mismatches reported; common subdirectories recurse.
/// Only write errors on `out` propagate.
pub fn compare_trees(left: &Path, right: &Path, out: &mut dyn Write) -> io::Result<()> {
    let left_entries = list_entries(left, out)?;
    let right_entries = list_entries(right, out)?;

    for (name, left_is_dir) in &left_entries {
        let Some(right_is_dir) = right_entries.get(name) else {
            writeln!(
                out,
                "diff file {} found in {} and {}",
                name,
                left.display(),
                right.display()
            )?;
            continue;
        };

        let left_path = left.join(name);
        let right_path = right.join(name);
        match (*left_is_dir, *right_is_dir) {
            (true, true) => compare_trees(&left_path, &right_path, out)?,
            (false, false) => compare_structure(&left_path, &right_path, out)?,
            _ => writeln!(
                out,
                "diff kind for {}: directory on one side, file on the other",
                name
            )?,
        }
    }

    for name in right_entries.keys() {
        if !left_entries.contains_key(name) {
            writeln!(
                out,
                "diff file {} found in {} and {}",
                name,
                left.display(),
                right.display()
            )?;
        }
    }

    Ok(())
}

/// Sorted directory listing as `name -> is_dir`, ignore list applied.
fn list_entries(dir: &Path, out: &mut dyn Write) -> io::Result<BTreeMap<String, bool>> {
    let mut entries = BTreeMap::new();
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(err) => {
            writeln!(out, "cannot read {}: {err}", dir.display())?;
            return Ok(entries);
        }
    };
    for entry in read.filter_map(|e| e.ok()) {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if IGNORED.contains(&name.as_str()) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.insert(name, is_dir);
    }
    Ok(entries)
}

/// Compares heading counts per level for one pair of files.
fn compare_structure(left: &Path, right: &Path, out: &mut dyn Write) -> io::Result<()> {
    let (Some(left_outline), Some(right_outline)) =
        (read_outline(left, out)?, read_outline(right, out)?)
    else {
        return Ok(());
    };

    for level in 0..COMPARED_LEVELS {
        let left_count = count_level(&left_outline, level);
        let right_count = count_level(&right_outline, level);
        if left_count != right_count {
            writeln!(
                out,
                "diff struct found, level {} in {} and {}",
                level,
                left.display(),
                right.display()
            )?;
        }
    }
    Ok(())
}

fn read_outline(path: &Path, out: &mut dyn Write) -> io::Result<Option<Vec<(u8, String)>>> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            writeln!(out, "cannot read {}: {err}", path.display())?;
            return Ok(None);
        }
    };
    match heading_outline(&source) {
        Ok(outline) => Ok(Some(outline)),
        Err(err) => {
            writeln!(out, "cannot parse {}: {err}", path.display())?;
            Ok(None)
        }
    }
}

fn count_level(outline: &[(u8, String)], level: u8) -> usize {
    outline.iter().filter(|(depth, _)| *depth == level).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn report(left: &Path, right: &Path) -> String {
        let mut out = Vec::new();
        compare_trees(left, right, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn identical_structure_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            &dir.path().join("zh/guide/basics.md"),
            "# 基础\n\n## 一\n\n## 二\n",
        );
        touch(
            &dir.path().join("en/guide/basics.md"),
            "# Basics\n\n## One\n\n## Two\n",
        );

        assert_eq!(report(&dir.path().join("zh"), &dir.path().join("en")), "");
    }

    #[test]
    fn extra_file_reported_without_heading_comparison() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zh/only_here.md"), "# Only\n");
        fs::create_dir_all(dir.path().join("en")).unwrap();

        let report = report(&dir.path().join("zh"), &dir.path().join("en"));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("diff file only_here.md"));
    }

    #[test]
    fn file_missing_on_left_also_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("zh")).unwrap();
        touch(&dir.path().join("en/extra.md"), "# Extra\n");

        let report = report(&dir.path().join("zh"), &dir.path().join("en"));
        assert!(report.contains("diff file extra.md"));
    }

    #[test]
    fn heading_count_mismatch_reported_per_level() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zh/a.md"), "# T\n\n## S\n\n## S2\n");
        touch(&dir.path().join("en/a.md"), "# T\n\n## S\n");

        let report = report(&dir.path().join("zh"), &dir.path().join("en"));
        assert!(report.contains("diff struct found, level 2"));
        assert!(!report.contains("level 1"));
    }

    #[test]
    fn ignored_names_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zh/images/pic.png"), "png");
        touch(&dir.path().join("zh/README.md"), "readme");
        touch(&dir.path().join("zh/a.md"), "# A\n");
        touch(&dir.path().join("en/a.md"), "# A\n");

        assert_eq!(report(&dir.path().join("zh"), &dir.path().join("en")), "");
    }

    #[test]
    fn nested_directories_recurse() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zh/guide/deep/x.md"), "# X\n\n### Z\n");
        touch(&dir.path().join("en/guide/deep/x.md"), "# X\n");

        let report = report(&dir.path().join("zh"), &dir.path().join("en"));
        assert!(report.contains("diff struct found, level 3"));
    }
}
