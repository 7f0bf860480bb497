//! Extract command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use clipmark_core::{classify, ClippingsParser, Library, Reconciler};

use crate::config::CliConfig;
use crate::input::{locate_clippings, read_clippings};
use crate::output::MarkdownWriter;
use crate::scan::scan_output_dir;
use crate::select::{prompt_selection, Selection};

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Clippings file exported by the device
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output directory for the note files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write every book without prompting
    #[arg(short, long)]
    pub all: bool,

    /// Write only these titles, skipping the prompt
    #[arg(short, long, value_name = "TITLE")]
    pub books: Vec<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        crate::init_logging(self.quiet, self.verbose);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let candidate = self
            .input
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.input.clippings_path));
        let input = locate_clippings(&candidate)?;
        log::info!("Processing clippings file {}", input.display());

        let out_dir = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.dir));
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

        let stream = read_clippings(&input)?;
        let notes = ClippingsParser::new().parse(&stream)?;
        let mut library = Library::from_notes(notes);
        log::info!(
            "Parsed {} notes across {} books",
            library.note_count(),
            library.len()
        );

        let warnings = Reconciler::new().reconcile_all(library.books_mut());
        for warning in &warnings {
            log::warn!(
                "Overlapping highlights in {} at {} / {}: {}",
                warning.book_title,
                warning.first_location,
                warning.second_location,
                warning.text
            );
        }

        log::info!("Scanning output dir {}", out_dir.display());
        let index = scan_output_dir(&out_dir, self.quiet)?;

        let selection = self.selection(&library)?;

        let writer = MarkdownWriter::new(
            out_dir,
            config.output.short_notes_file.clone(),
            config.output.short_note_threshold,
        );

        let mut files = 0;
        let mut written = 0;
        for book in library.select(|title| selection.contains(title)) {
            let report = classify(book, &index);
            if let Some(outcome) = writer.write_book(book, &report)? {
                files += 1;
                written += outcome.notes_written;
            }
        }

        if !self.quiet {
            println!("Wrote {written} new notes across {files} files");
        }
        Ok(())
    }

    /// Books to write: everything, the explicit `--books` titles, or
    /// whatever the user picks at the prompt.
    fn selection(&self, library: &Library) -> Result<Selection> {
        if self.all {
            return Ok(Selection::All);
        }
        if !self.books.is_empty() {
            return Ok(Selection::from_titles(self.books.iter().cloned()));
        }
        prompt_selection(&library.titles())
    }
}
