//! List command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use clipmark_core::{ClippingsParser, Library};
use serde::Serialize;

use crate::config::CliConfig;
use crate::input::{locate_clippings, read_clippings};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Clippings file exported by the device
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ListFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Supported list output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ListFormat {
    /// One book per line with its note count
    Text,
    /// JSON array of book summaries
    Json,
}

/// One book as printed by `list --format json`.
#[derive(Debug, Serialize)]
struct BookSummary<'a> {
    title: &'a str,
    author: &'a str,
    notes: usize,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let candidate = self
            .input
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.input.clippings_path));
        let input = locate_clippings(&candidate)?;

        let stream = read_clippings(&input)?;
        let notes = ClippingsParser::new().parse(&stream)?;
        let library = Library::from_notes(notes);

        match self.format {
            ListFormat::Text => {
                for book in library.books() {
                    println!(
                        "{} ({}): {} notes",
                        book.title,
                        book.author,
                        book.notes.len()
                    );
                }
            }
            ListFormat::Json => {
                let summaries: Vec<BookSummary> = library
                    .books()
                    .iter()
                    .map(|book| BookSummary {
                        title: &book.title,
                        author: &book.author,
                        notes: book.notes.len(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            }
        }

        Ok(())
    }
}
