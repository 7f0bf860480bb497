//! Locating and reading the clippings export

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::CliError;

/// Resolve the clippings file: the given (or configured) path if it exists,
/// otherwise the file on a mounted device.
pub fn locate_clippings(candidate: &Path) -> Result<PathBuf> {
    if candidate.is_file() {
        return Ok(candidate.to_path_buf());
    }

    if let Some(mounted) = device_mount_path() {
        if mounted.is_file() {
            log::info!(
                "{} not found, using mounted device file {}",
                candidate.display(),
                mounted.display()
            );
            return Ok(mounted.to_path_buf());
        }
    }

    Err(CliError::InputNotFound(candidate.display().to_string()).into())
}

/// Where a plugged-in Kindle exposes its clippings on Linux.
fn device_mount_path() -> Option<PathBuf> {
    let user = std::env::var("USER").ok()?;
    Some(
        Path::new("/media")
            .join(user)
            .join("Kindle/documents/My Clippings.txt"),
    )
}

/// Read the export as UTF-8 and skip the byte-order marker the device
/// writes at the start of the stream.
pub fn read_clippings(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read clippings file: {}", path.display()))?;

    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}
