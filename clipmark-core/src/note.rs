//! Note records parsed from the clippings stream

use std::fmt;

use chrono::NaiveDateTime;

/// Sentinel author used when the header line carries no `(Author)` group.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Kind of annotation, taken verbatim from the `- Your <Type>` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteType {
    /// A highlighted passage
    Highlight,
    /// A typed note
    Note,
    /// A bookmark; carries no text
    Bookmark,
    /// Any other annotation token the device emits
    Other(String),
}

impl NoteType {
    pub(crate) fn from_token(token: &str) -> Self {
        match token {
            "Highlight" => NoteType::Highlight,
            "Note" => NoteType::Note,
            "Bookmark" => NoteType::Bookmark,
            other => NoteType::Other(other.to_string()),
        }
    }

    /// The token as it appeared in the export.
    pub fn as_str(&self) -> &str {
        match self {
            NoteType::Highlight => "Highlight",
            NoteType::Note => "Note",
            NoteType::Bookmark => "Bookmark",
            NoteType::Other(token) => token,
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed highlight, note, or bookmark.
///
/// A note carries every field extracted from its record; there are no
/// parallel hash-keyed side tables to fall out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNote {
    /// The raw header line. Groups notes from the same source even when the
    /// title/author split is ambiguous.
    pub book_key: String,
    /// Title extracted from the header, or the whole header line.
    pub title: String,
    /// Author extracted from the header, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// Annotation kind.
    pub note_type: NoteType,
    /// Human-readable position: `"loc. X"`, `"p.Y"`, `"loc. X, p.Y"`, or
    /// empty when the info line carried neither.
    pub location: String,
    /// Raw timestamp text after "Added on".
    pub date_raw: String,
    /// Parsed timestamp, when `date_raw` matched a known export format.
    pub date_parsed: Option<NaiveDateTime>,
    /// Normalized text. Empty for most bookmarks.
    pub text: String,
    /// 8-hex-char content hash of `text`; the note's dedup identity.
    pub hash: String,
}

impl RawNote {
    /// Timestamp rendered for output: the parsed form when available, the
    /// raw source text otherwise.
    pub fn date_string(&self) -> String {
        match self.date_parsed {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.date_raw.clone(),
        }
    }

    /// Whether the note has no text to write (a pure bookmark).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
