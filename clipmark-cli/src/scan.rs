//! Scanning prior output for already-emitted note hashes
//!
//! Every note written by the Markdown writer is preceded by a comment line
//! starting `.. <hash>`. Scanning the output directory for those lines
//! rebuilds the dedup index without any separate state file: the notes
//! themselves are the record of what has been emitted.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clipmark_core::ExistingHashIndex;
use regex::Regex;

use crate::error::CliError;
use crate::progress::ScanProgress;

/// Build the existing-hash index from every Markdown file under `dir`.
///
/// Hashes are labeled with the file name (not the full path), which is all
/// the diagnostics need. A directory that does not exist yet yields an
/// empty index; the first run starts from nothing.
pub fn scan_output_dir(dir: &Path, quiet: bool) -> Result<ExistingHashIndex> {
    let mut index = ExistingHashIndex::new();
    if !dir.is_dir() {
        log::debug!("output dir {} does not exist yet, nothing to scan", dir.display());
        return Ok(index);
    }

    let hashline = Regex::new(r"^\.\.\s*([0-9a-fA-F]+)").expect("hashline pattern");
    let files = markdown_files(dir)?;
    let progress = ScanProgress::new(quiet, files.len() as u64);

    for path in &files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut found = 0;
        for line in content.lines() {
            if let Some(caps) = hashline.captures(line) {
                index.insert(caps[1].to_lowercase(), label.clone());
                found += 1;
            }
        }

        log::debug!("{}: {} hashes", path.display(), found);
        progress.file_scanned(&label, found);
    }

    progress.finish(index.len());
    log::info!(
        "Found {} existing note hashes in {} files",
        index.len(),
        files.len()
    );
    Ok(index)
}

/// All Markdown files under the output directory, recursively.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("**/*.md");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| CliError::InvalidPattern(pattern.display().to_string()))?;

    let paths = glob::glob(pattern)
        .map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.with_context(|| format!("Error resolving pattern: {pattern}"))?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_yields_empty_index() {
        let dir = TempDir::new().unwrap();
        let index = scan_output_dir(&dir.path().join("not-there"), true).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn collects_hashes_from_markdown_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Author - Book.md"),
            ".. a1b2c3d4 ; loc. 10-12 ; 2024-01-01 00:00:00\n\
             >Some text\n\
             ---\n\
             \n\
             .. deadbeef ; loc. 50-60 ; 2024-01-02 00:00:00\n\
             >More text\n",
        )
        .unwrap();

        let index = scan_output_dir(dir.path(), true).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("a1b2c3d4"), Some("Author - Book.md"));
        assert_eq!(index.lookup("deadbeef"), Some("Author - Book.md"));
    }

    #[test]
    fn scans_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(
            dir.path().join("archive/old.md"),
            ".. 01234567 ; p.3 ; 2020-05-05 12:00:00\n>old note\n",
        )
        .unwrap();

        let index = scan_output_dir(dir.path(), true).unwrap();
        assert_eq!(index.lookup("01234567"), Some("old.md"));
    }

    #[test]
    fn ignores_non_markdown_and_non_hash_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), ".. feedface ; p.1 ; x\n").unwrap();
        fs::write(
            dir.path().join("real.md"),
            "# Heading\n\nplain text\n.. nothex!! ; garbage\n",
        )
        .unwrap();

        let index = scan_output_dir(dir.path(), true).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn uppercase_hashes_are_normalized() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), ".. DEADBEEF ; p.1 ; x\n").unwrap();

        let index = scan_output_dir(dir.path(), true).unwrap();
        assert!(index.contains("deadbeef"));
    }
}
