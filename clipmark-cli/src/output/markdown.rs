//! Markdown note writer
//!
//! Books with enough new notes get their own file; the rest are appended to
//! a shared short-notes file. Every note is preceded by a `.. <hash> ; ...`
//! comment line that the next run's scanner re-parses, which is what makes
//! repeated extractions append-only.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clipmark_core::filename::suggested_filename;
use clipmark_core::{Book, BookReport, NoteStatus, RawNote, UNKNOWN_AUTHOR};

/// Writes one book's new notes to the output directory.
pub struct MarkdownWriter {
    out_dir: PathBuf,
    short_notes_file: String,
    short_note_threshold: usize,
}

/// What one `write_book` call produced.
#[derive(Debug)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub notes_written: usize,
}

impl MarkdownWriter {
    pub fn new(out_dir: PathBuf, short_notes_file: String, short_note_threshold: usize) -> Self {
        Self {
            out_dir,
            short_notes_file,
            short_note_threshold,
        }
    }

    /// Append a book's new notes to its file, creating it with a header on
    /// first contact. Books without new writable notes produce no file I/O
    /// at all. Returns `None` in that case.
    pub fn write_book(&self, book: &Book, report: &BookReport) -> Result<Option<WriteOutcome>> {
        let new: Vec<&RawNote> = report.new_notes().collect();
        if new.is_empty() {
            log::info!("No new notes for {}", book.title);
            return Ok(None);
        }
        log::info!("{} new notes found for {}", new.len(), book.title);

        let short = report.is_short(self.short_note_threshold);
        let filename = if short {
            self.short_notes_file.clone()
        } else {
            suggested_filename(&book.author, &book.title)
        };
        let path = self.out_dir.join(&filename);
        let existed = path.exists();

        let mut content = String::new();
        if short {
            push_short_header(&mut content, book);
        } else if !existed {
            push_frontmatter(&mut content, book);
        }

        let mut notes_written = 0;
        let mut last_date: Option<NaiveDateTime> = None;

        for status in &report.statuses {
            match status {
                NoteStatus::Existing(note, label) => {
                    log::info!("Note {} is already in {}", note.hash, label);
                }
                NoteStatus::New(note) if note.is_empty() => {
                    log::info!(
                        "Note {} is empty, probably because it is a {}",
                        note.hash,
                        note.note_type
                    );
                }
                NoteStatus::New(note) => {
                    log::debug!(
                        "Adding note {} ({}, {}) to {}",
                        note.hash,
                        note.note_type,
                        note.location,
                        path.display()
                    );
                    push_note(&mut content, book, note, short);
                    notes_written += 1;
                }
            }
            // Track the newest parsed timestamp across the whole book, not
            // just the written notes; it becomes the file's mtime.
            let note = match status {
                NoteStatus::New(note) | NoteStatus::Existing(note, _) => note,
            };
            if let Some(parsed) = note.date_parsed {
                last_date = Some(parsed);
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if let Some(mtime) = epoch_time(last_date) {
            // Advisory: lets file listings sort by when the book was last
            // annotated.
            if let Err(e) = file.set_modified(mtime) {
                log::warn!("Could not set mtime on {}: {}", path.display(), e);
            }
        }

        Ok(Some(WriteOutcome {
            path,
            notes_written,
        }))
    }
}

/// Section header used in the shared short-notes file.
fn push_short_header(content: &mut String, book: &Book) {
    let title_line = if book.author == UNKNOWN_AUTHOR {
        book.title.clone()
    } else {
        format!("{} - {}", book.author, book.title)
    };
    content.push_str(&title_line);
    content.push('\n');
    content.push_str(&"-".repeat(title_line.chars().count()));
    content.push_str("\n\n");
}

/// YAML frontmatter plus the section scaffold for a fresh per-book file.
fn push_frontmatter(content: &mut String, book: &Book) {
    content.push_str("---\n");
    content.push_str(&format!(
        "created_date: {}\n",
        chrono::Local::now().format("%Y-%m-%d")
    ));
    content.push_str(&format!("title: {}\n", book.title));
    if book.author != UNKNOWN_AUTHOR {
        content.push_str(&format!("authors: [{}]\n", book.author));
    }
    content.push_str("tags:\n  - books\n");
    content.push_str("---\n");
    content.push_str("## Summary\n");
    content.push('\n');
    content.push_str("## Highlights\n");
}

/// One note: the re-scannable comment line, then the quoted text.
fn push_note(content: &mut String, book: &Book, note: &RawNote, short: bool) {
    let mut comment = format!(".. {} ; {} ; {}", note.hash, note.location, note.date_string());
    if short {
        comment.push_str(&format!(" ; {} ; {}", book.author, book.title));
    }
    content.push_str(&comment);
    content.push('\n');
    content.push('>');
    content.push_str(&note.text);
    content.push_str("\n---\n\n");
}

/// Seconds-since-epoch form of the last annotation timestamp. Treated as
/// UTC; pre-epoch dates are ignored.
fn epoch_time(last_date: Option<NaiveDateTime>) -> Option<SystemTime> {
    let ts = last_date?.and_utc().timestamp();
    u64::try_from(ts)
        .ok()
        .map(|secs| SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
}
