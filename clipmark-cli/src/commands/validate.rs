//! Validate command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use clipmark_core::{ClippingsParser, Library};

use crate::input::{locate_clippings, read_clippings};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Clippings file to check
    #[arg(value_name = "FILE", required = true)]
    pub input: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating clippings file: {}", self.input.display());

        let input = locate_clippings(&self.input)?;
        let stream = read_clippings(&input)?;

        match ClippingsParser::new().parse(&stream) {
            Ok(notes) => {
                let library = Library::from_notes(notes);
                println!("✓ File is well-formed!");
                println!("  Records: {}", library.note_count());
                println!("  Books: {}", library.len());
                Ok(())
            }
            Err(e) => {
                println!("✗ File is malformed!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
