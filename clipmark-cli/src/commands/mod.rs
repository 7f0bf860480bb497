//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod extract;
pub mod generate_config;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract new highlights and notes into per-book Markdown files
    Extract(extract::ExtractArgs),

    /// List the books found in a clippings file
    List(list::ListArgs),

    /// Check that a clippings file parses cleanly
    Validate(validate::ValidateArgs),

    /// Print the default configuration as TOML
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Dispatch to the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Extract(args) => args.execute(),
            Commands::List(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}
