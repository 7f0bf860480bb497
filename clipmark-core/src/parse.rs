//! Record parser for the clippings export format
//!
//! The export is a flat stream of records, each spanning five productions:
//!
//! ```text
//! <title line>                              header: "Title (Author)" or bare title
//! - Your <Type> <where> | Added on <date>   info line
//!                                           blank line
//! <one or more text lines>                  may be empty for bookmarks
//! ==========                                delimiter
//! ```
//!
//! Each production has its own parsing function returning a tagged result;
//! structural validation never relies on panics. A malformed info line aborts
//! the whole run with the offending line attached for diagnostics. A
//! timestamp that fails to parse is recovered locally by keeping the raw
//! string.

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{ParseError, Result};
use crate::hash::content_hash;
use crate::note::{NoteType, RawNote, UNKNOWN_AUTHOR};

/// Delimiter line terminating every record.
const RECORD_SEPARATOR: &str = "==========";

/// Timestamp formats seen in device exports: day-first (EU firmware) and
/// month-first 12-hour (US firmware), with and without the weekday.
const DATE_FORMATS: &[&str] = &[
    "%A, %d %B %Y %H:%M:%S",
    "%A, %B %d, %Y %I:%M:%S %p",
    "%d %B %Y %H:%M:%S",
    "%B %d, %Y %I:%M:%S %p",
];

/// Parser for the clippings stream. Holds the compiled record grammar.
pub struct ClippingsParser {
    header: Regex,
    info: Regex,
    location: Regex,
    page: Regex,
}

impl ClippingsParser {
    pub fn new() -> Self {
        Self {
            header: Regex::new(r"^(.*)\((.*)\)$").expect("header pattern"),
            info: Regex::new(r"^- Your (\S+) (.*)[\s|]+Added on\s+(.+)$").expect("info pattern"),
            location: Regex::new(r"location ([\d-]+)").expect("location pattern"),
            page: Regex::new(r"page ([\d-]+)").expect("page pattern"),
        }
    }

    /// Parse the whole stream into records, in source order.
    ///
    /// Source order is the order the annotations were made on the device,
    /// not their order within a book; see the reconciler for the latter.
    pub fn parse(&self, input: &str) -> Result<Vec<RawNote>> {
        // Exports open with a byte-order marker. The caller is expected to
        // have skipped it, but strip defensively so a raw stream still parses.
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        let mut lines = input.lines().map(str::trim);
        let mut notes = Vec::new();
        let mut record = 0usize;

        while let Some(header) = lines.next() {
            // The stream ends at EOF or at a blank line where a header
            // should be (a trailing newline after the last separator).
            if header.is_empty() {
                break;
            }
            record += 1;

            let key = header.trim_start_matches('\u{feff}').trim();
            let (title, author) = self.parse_header(key);

            let info = lines
                .next()
                .ok_or(ParseError::UnexpectedEof { record })?;
            let (note_type, location, date_raw) = self.parse_info(record, info)?;

            // Blank line between the info line and the text block.
            lines
                .next()
                .ok_or(ParseError::UnexpectedEof { record })?;

            let text = Self::parse_text(record, &mut lines)?;

            let date_parsed = parse_date(&date_raw);
            let hash = content_hash(&text);

            notes.push(RawNote {
                book_key: key.to_string(),
                title,
                author,
                note_type,
                location,
                date_raw,
                date_parsed,
                text,
                hash,
            });
        }

        Ok(notes)
    }

    /// Header production: `<title>(<author>)` when the line ends with a
    /// parenthesized group, otherwise the whole line with an unknown author.
    fn parse_header(&self, line: &str) -> (String, String) {
        match self.header.captures(line) {
            Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
            None => (line.to_string(), UNKNOWN_AUTHOR.to_string()),
        }
    }

    /// Info production: annotation type, rendered location, raw date.
    ///
    /// A line that does not match the pattern is fatal for the run.
    fn parse_info(&self, record: usize, line: &str) -> Result<(NoteType, String, String)> {
        let caps = self
            .info
            .captures(line)
            .ok_or_else(|| ParseError::MalformedRecord {
                record,
                line: line.to_string(),
            })?;

        let note_type = NoteType::from_token(&caps[1]);
        let location = self.render_location(&caps[2]);
        let date_raw = caps[3].trim().to_string();

        Ok((note_type, location, date_raw))
    }

    /// Location and page are searched independently; either, both, or
    /// neither may be present in the info line's middle segment.
    fn render_location(&self, segment: &str) -> String {
        let loc = self
            .location
            .captures(segment)
            .map(|c| c[1].to_string());
        let page = self.page.captures(segment).map(|c| c[1].to_string());

        match (loc, page) {
            (Some(l), Some(p)) => format!("loc. {l}, p.{p}"),
            (Some(l), None) => format!("loc. {l}"),
            (None, Some(p)) => format!("p.{p}"),
            (None, None) => String::new(),
        }
    }

    /// Text production: every line up to the record separator, normalized.
    ///
    /// Normalization is a single-pass collapse of two consecutive spaces to
    /// one, then an outer trim. The single pass means runs of three or more
    /// spaces only partially collapse; hashes of previously exported notes
    /// depend on this exact behavior, so it must not become recursive.
    fn parse_text<'a, I>(record: usize, lines: &mut I) -> Result<String>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut text = String::new();
        loop {
            let line = lines
                .next()
                .ok_or(ParseError::UnexpectedEof { record })?;
            if line == RECORD_SEPARATOR {
                break;
            }
            text.push_str(line);
            text.push('\n');
        }
        Ok(text.replace("  ", " ").trim().to_string())
    }
}

impl Default for ClippingsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort timestamp parse against the known export formats.
/// `None` means the caller keeps the raw string; never an error.
fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
