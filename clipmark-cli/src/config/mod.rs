//! Configuration module

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct InputConfig {
    /// Default clippings file path
    pub clippings_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            clippings_path: "My Clippings.txt".to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory the note files are written to
    pub dir: String,

    /// Shared file collecting books with few new notes
    pub short_notes_file: String,

    /// Books with at most this many new notes go to the shared file
    pub short_note_threshold: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "./clippings".to_string(),
            short_notes_file: "short_notes.md".to_string(),
            short_note_threshold: 2,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {}", path.display(), e)).into())
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = CliConfig::default();
        assert_eq!(config.input.clippings_path, "My Clippings.txt");
        assert_eq!(config.output.dir, "./clippings");
        assert_eq!(config.output.short_notes_file, "short_notes.md");
        assert_eq!(config.output.short_note_threshold, 2);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[output]\ndir = \"notes\"\nshort_notes_file = \"misc.md\"\nshort_note_threshold = 3\n").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.output.dir, "notes");
        assert_eq!(config.output.short_note_threshold, 3);
        assert_eq!(config.input.clippings_path, "My Clippings.txt");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[output\ndir = ").unwrap();
        assert!(CliConfig::load(file.path()).is_err());
    }

    #[test]
    fn default_toml_round_trips() {
        let rendered = CliConfig::default_toml();
        let parsed: CliConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.output.dir, CliConfig::default().output.dir);
    }
}
