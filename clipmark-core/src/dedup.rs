//! Dedup gate against previously written notes
//!
//! Prior runs leave an 8-hex-char hash token in a comment line above every
//! note they write. The surrounding tool scans its output directory for
//! those tokens and hands the resulting index to the gate; the gate then
//! decides, per note, whether it is genuinely new or already captured. The
//! index is read-only input here and is never mutated by the core.

use std::collections::HashMap;

use crate::library::Book;
use crate::note::RawNote;

/// Hashes found in previously generated files, each mapped to a label for
/// the file that contains it (used only for diagnostics).
#[derive(Debug, Default, Clone)]
pub struct ExistingHashIndex {
    map: HashMap<String, String>,
}

impl ExistingHashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hash: impl Into<String>, label: impl Into<String>) {
        self.map.insert(hash.into(), label.into());
    }

    /// Label of the file already holding this hash, if any.
    pub fn lookup(&self, hash: &str) -> Option<&str> {
        self.map.get(hash).map(String::as_str)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.map.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(String, String)> for ExistingHashIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

/// Per-note verdict from the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStatus<'a> {
    /// Hash absent from the index; the note has not been emitted before.
    New(&'a RawNote),
    /// Hash already present in the named file.
    Existing(&'a RawNote, &'a str),
}

/// Gate result for one book, statuses in reconciled note order.
#[derive(Debug)]
pub struct BookReport<'a> {
    pub statuses: Vec<NoteStatus<'a>>,
}

impl<'a> BookReport<'a> {
    /// New notes that carry text, in order. Pure bookmarks are never
    /// written, so they are excluded here even when their hash is new.
    pub fn new_notes(&self) -> impl Iterator<Item = &'a RawNote> + '_ {
        self.statuses.iter().filter_map(|status| match status {
            NoteStatus::New(note) if !note.is_empty() => Some(*note),
            _ => None,
        })
    }

    /// Count of new, writable notes. Decides both whether the book is
    /// written at all and whether it routes to the shared short-notes file.
    pub fn new_count(&self) -> usize {
        self.new_notes().count()
    }

    pub fn has_new(&self) -> bool {
        self.new_notes().next().is_some()
    }

    /// Whether the book should route to the shared short-notes file rather
    /// than its own per-book file.
    pub fn is_short(&self, threshold: usize) -> bool {
        self.new_count() <= threshold
    }
}

/// Partition a book's notes into new and already-present.
///
/// Classification is by content hash alone. A hash collision between two
/// distinct notes therefore makes the second look like a duplicate of the
/// first; with 8 hex chars this is vanishingly unlikely and accepted.
pub fn classify<'a>(book: &'a Book, index: &'a ExistingHashIndex) -> BookReport<'a> {
    let statuses = book
        .notes
        .iter()
        .map(|note| match index.lookup(&note.hash) {
            Some(label) => NoteStatus::Existing(note, label),
            None => NoteStatus::New(note),
        })
        .collect();

    BookReport { statuses }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::content_hash;
    use crate::library::Library;
    use crate::note::{NoteType, RawNote};

    fn note(text: &str, note_type: NoteType) -> RawNote {
        RawNote {
            book_key: "Book (Author)".to_string(),
            title: "Book".to_string(),
            author: "Author".to_string(),
            note_type,
            location: String::new(),
            date_raw: String::new(),
            date_parsed: None,
            hash: content_hash(text),
            text: text.to_string(),
        }
    }

    fn book(notes: Vec<RawNote>) -> Book {
        Library::from_notes(notes).books()[0].clone()
    }

    #[test]
    fn unseen_hashes_are_new() {
        let b = book(vec![note("alpha", NoteType::Highlight)]);
        let index = ExistingHashIndex::new();

        let report = classify(&b, &index);
        assert_eq!(report.new_count(), 1);
        assert!(matches!(report.statuses[0], NoteStatus::New(_)));
    }

    #[test]
    fn known_hashes_carry_their_owning_file() {
        let b = book(vec![note("alpha", NoteType::Highlight)]);
        let mut index = ExistingHashIndex::new();
        index.insert(content_hash("alpha"), "Author - Book.md");

        let report = classify(&b, &index);
        assert_eq!(report.new_count(), 0);
        assert!(!report.has_new());
        match &report.statuses[0] {
            NoteStatus::Existing(_, label) => assert_eq!(*label, "Author - Book.md"),
            other => panic!("expected existing, got {other:?}"),
        }
    }

    #[test]
    fn empty_text_notes_never_count_as_writable() {
        let b = book(vec![
            note("", NoteType::Bookmark),
            note("real text", NoteType::Highlight),
        ]);
        let index = ExistingHashIndex::new();
        let report = classify(&b, &index);

        // The bookmark is classified (it counts toward parsing and
        // ordering) but never surfaces as a writable note.
        assert_eq!(report.statuses.len(), 2);
        assert_eq!(report.new_count(), 1);
        assert_eq!(report.new_notes().next().unwrap().text, "real text");
    }

    #[test]
    fn statuses_keep_note_order() {
        let b = book(vec![
            note("one", NoteType::Highlight),
            note("two", NoteType::Highlight),
            note("three", NoteType::Highlight),
        ]);
        let mut index = ExistingHashIndex::new();
        index.insert(content_hash("two"), "prior.md");

        let report = classify(&b, &index);
        let texts: Vec<_> = report.new_notes().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["one", "three"]);
    }

    #[test]
    fn index_from_iterator() {
        let index: ExistingHashIndex = [
            ("aaaaaaaa".to_string(), "a.md".to_string()),
            ("bbbbbbbb".to_string(), "b.md".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(index.len(), 2);
        assert!(index.contains("aaaaaaaa"));
        assert_eq!(index.lookup("bbbbbbbb"), Some("b.md"));
    }
}
