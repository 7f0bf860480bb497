//! Chronology reconciliation and overlap detection
//!
//! Notes arrive in the order they were highlighted, which rarely matches
//! their position in the book: readers jump around, revisit chapters, and
//! re-highlight passages. The reconciler reorders each book's notes toward
//! book-position order wherever the location data supports it, and surfaces
//! suspected duplicate highlights for human review. It never drops or
//! merges anything.

use regex::Regex;

use crate::library::Book;
use crate::note::NoteType;
use crate::similarity::lcs_len;

/// Below this char length a similarity judgment is meaningless.
const MIN_OVERLAP_LEN: usize = 52;

/// Fraction of the longer text the common run must exceed to flag a pair.
const OVERLAP_RATIO: f64 = 0.4;

/// Suspected duplicate/overlapping highlight pair, surfaced as a diagnostic.
#[derive(Debug, Clone)]
pub struct OverlapWarning {
    pub book_title: String,
    pub first_location: String,
    pub second_location: String,
    pub first_hash: String,
    pub second_hash: String,
    /// Text of the first note of the pair, for display.
    pub text: String,
}

/// Reorders books from highlight-time order to book-position order.
pub struct Reconciler {
    range: Regex,
    number: Regex,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            range: Regex::new(r"(\d+)-(\d+)").expect("range pattern"),
            number: Regex::new(r"(\d+)").expect("number pattern"),
        }
    }

    /// Reorder one book's notes in place and report suspected duplicates.
    ///
    /// The branch is picked from the first note's location string:
    /// - `"loc. "` present: stable sort by the start of the location range;
    ///   notes without a parseable range rank first. Overlap detection runs
    ///   on the reordered list.
    /// - `"p."` present: stable sort by the first number; unparseable
    ///   entries rank first. Page positions carry no ranges, so no overlap
    ///   pass runs for page-based books.
    /// - neither: highlight-time order is kept as-is.
    pub fn reconcile(&self, book: &mut Book) -> Vec<OverlapWarning> {
        let Some(first) = book.notes.first() else {
            return Vec::new();
        };

        if first.location.contains("loc. ") {
            book.notes
                .sort_by_key(|note| self.range_start(&note.location));
            self.detect_overlaps(book)
        } else if first.location.contains("p.") {
            book.notes
                .sort_by_key(|note| self.leading_number(&note.location));
            Vec::new()
        } else {
            Vec::new()
        }
    }

    /// Reconcile every book and collect all warnings.
    pub fn reconcile_all(&self, books: &mut [Book]) -> Vec<OverlapWarning> {
        books
            .iter_mut()
            .flat_map(|book| self.reconcile(book))
            .collect()
    }

    /// Sort rank for the location-range branch. A dash-less location like
    /// `loc. 2802` has no range and ranks -1, same as no location at all.
    fn range_start(&self, location: &str) -> i64 {
        self.parse_range(location)
            .map(|(start, _)| start)
            .unwrap_or(-1)
    }

    fn parse_range(&self, location: &str) -> Option<(i64, i64)> {
        let caps = self.range.captures(location)?;
        let start = caps[1].parse().ok()?;
        let end = caps[2].parse().ok()?;
        Some((start, end))
    }

    /// Sort rank for the page branch: the first digit run, or -1.
    fn leading_number(&self, location: &str) -> i64 {
        self.number
            .captures(location)
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(-1)
    }

    /// Flag adjacent pairs whose location ranges touch and whose texts share
    /// a contiguous run longer than [`OVERLAP_RATIO`] of the longer text.
    /// Bookmarks and short texts are skipped outright.
    fn detect_overlaps(&self, book: &Book) -> Vec<OverlapWarning> {
        let mut warnings = Vec::new();

        for pair in book.notes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);

            if a.note_type == NoteType::Bookmark || b.note_type == NoteType::Bookmark {
                continue;
            }
            let longer = a.text.chars().count().max(b.text.chars().count());
            if longer < MIN_OVERLAP_LEN {
                continue;
            }
            let (Some(ra), Some(rb)) = (self.parse_range(&a.location), self.parse_range(&b.location))
            else {
                continue;
            };

            let endpoints_touch =
                ra.0 == rb.0 || ra.0 == rb.1 || ra.1 == rb.0 || ra.1 == rb.1;
            if !endpoints_touch {
                continue;
            }

            let common = lcs_len(&a.text, &b.text);
            if common as f64 > OVERLAP_RATIO * longer as f64 {
                warnings.push(OverlapWarning {
                    book_title: book.title.clone(),
                    first_location: a.location.clone(),
                    second_location: b.location.clone(),
                    first_hash: a.hash.clone(),
                    second_hash: b.hash.clone(),
                    text: a.text.clone(),
                });
            }
        }

        warnings
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::content_hash;
    use crate::library::Library;
    use crate::note::RawNote;

    fn note(location: &str, note_type: NoteType, text: &str) -> RawNote {
        RawNote {
            book_key: "Book (Author)".to_string(),
            title: "Book".to_string(),
            author: "Author".to_string(),
            note_type,
            location: location.to_string(),
            date_raw: String::new(),
            date_parsed: None,
            hash: content_hash(text),
            text: text.to_string(),
        }
    }

    fn book(notes: Vec<RawNote>) -> Book {
        let mut library = Library::from_notes(notes);
        library.books_mut()[0].clone()
    }

    #[test]
    fn location_ranges_sort_by_range_start() {
        let mut b = book(vec![
            note("loc. 10-12", NoteType::Highlight, "b"),
            note("loc. 50-60", NoteType::Highlight, "c"),
            note("loc. 1-5", NoteType::Highlight, "a"),
        ]);
        Reconciler::new().reconcile(&mut b);
        let order: Vec<_> = b.notes.iter().map(|n| n.location.as_str()).collect();
        assert_eq!(order, ["loc. 1-5", "loc. 10-12", "loc. 50-60"]);
    }

    #[test]
    fn rangeless_locations_sort_first() {
        let mut b = book(vec![
            note("loc. 10-12", NoteType::Highlight, "b"),
            note("loc. 2802", NoteType::Bookmark, ""),
        ]);
        Reconciler::new().reconcile(&mut b);
        assert_eq!(b.notes[0].location, "loc. 2802");
        assert_eq!(b.notes[1].location, "loc. 10-12");
    }

    #[test]
    fn pages_sort_by_leading_number() {
        let mut b = book(vec![
            note("p.30", NoteType::Highlight, "c"),
            note("p.2", NoteType::Highlight, "a"),
            note("p.12", NoteType::Highlight, "b"),
        ]);
        Reconciler::new().reconcile(&mut b);
        let order: Vec<_> = b.notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn no_location_data_keeps_highlight_time_order() {
        let mut b = book(vec![
            note("", NoteType::Highlight, "second highlighted"),
            note("", NoteType::Highlight, "first highlighted"),
        ]);
        Reconciler::new().reconcile(&mut b);
        assert_eq!(b.notes[0].text, "second highlighted");
    }

    #[test]
    fn sorting_is_stable_for_equal_ranks() {
        let mut b = book(vec![
            note("loc. 5-8", NoteType::Highlight, "first at 5"),
            note("loc. 5-9", NoteType::Highlight, "second at 5"),
        ]);
        Reconciler::new().reconcile(&mut b);
        assert_eq!(b.notes[0].text, "first at 5");
    }

    // A pair of long texts sharing a run well past the 40% threshold.
    const LONG_A: &str =
        "The quick brown fox jumps over the lazy dog near the riverbank at dawn.";
    const LONG_B: &str =
        "The quick brown fox jumps over the lazy dog near the old mill in the";

    #[test]
    fn touching_ranges_with_shared_text_are_flagged() {
        let mut b = book(vec![
            note("loc. 100-150", NoteType::Highlight, LONG_A),
            note("loc. 150-200", NoteType::Highlight, LONG_B),
        ]);
        let warnings = Reconciler::new().reconcile(&mut b);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].first_location, "loc. 100-150");
        assert_eq!(warnings[0].second_location, "loc. 150-200");
        assert_eq!(warnings[0].text, LONG_A);
    }

    #[test]
    fn disjoint_ranges_are_not_flagged() {
        let mut b = book(vec![
            note("loc. 100-150", NoteType::Highlight, LONG_A),
            note("loc. 151-200", NoteType::Highlight, LONG_B),
        ]);
        assert!(Reconciler::new().reconcile(&mut b).is_empty());
    }

    #[test]
    fn dissimilar_texts_are_not_flagged() {
        let mut b = book(vec![
            note(
                "loc. 100-150",
                NoteType::Highlight,
                "An entirely different passage about sailing ships and the open sea.",
            ),
            note("loc. 150-200", NoteType::Highlight, LONG_B),
        ]);
        assert!(Reconciler::new().reconcile(&mut b).is_empty());
    }

    #[test]
    fn bookmarks_never_flag() {
        let mut b = book(vec![
            note("loc. 100-150", NoteType::Bookmark, LONG_A),
            note("loc. 150-200", NoteType::Highlight, LONG_B),
        ]);
        assert!(Reconciler::new().reconcile(&mut b).is_empty());
    }

    #[test]
    fn short_texts_never_flag() {
        let mut b = book(vec![
            note("loc. 100-150", NoteType::Highlight, "short shared text"),
            note("loc. 150-200", NoteType::Highlight, "short shared text"),
        ]);
        assert!(Reconciler::new().reconcile(&mut b).is_empty());
    }

    #[test]
    fn page_based_books_get_no_overlap_warnings() {
        // Same texts that would flag in the location branch.
        let mut b = book(vec![
            note("p.100", NoteType::Highlight, LONG_A),
            note("p.100", NoteType::Highlight, LONG_B),
        ]);
        assert!(Reconciler::new().reconcile(&mut b).is_empty());
    }
}
