//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// Clippings file not found at the given path or the device mount
    InputNotFound(String),
    /// Invalid output-scan pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Book selection was aborted or invalid
    SelectionError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputNotFound(path) => {
                write!(f, "Could not find clippings file: {path}")
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid scan pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SelectionError(msg) => write!(f, "Book selection failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
