//! Parsing, ordering, and deduplication engine for e-reader clippings
//! exports
//!
//! An e-reader dumps every highlight, note, and bookmark into one flat,
//! delimiter-separated text file, in the order the annotations were made.
//! This crate turns that stream into per-book note collections ready for a
//! personal knowledge base:
//!
//! - **parse**: the record grammar (header, info line, text block,
//!   `==========` delimiter) producing one [`RawNote`] per record
//! - **library**: grouping of notes by their raw header key
//! - **reconcile**: reordering from highlight-time order toward book-position
//!   order, plus duplicate-highlight detection via a longest-common-substring
//!   metric
//! - **dedup**: a content-hash gate against notes emitted by previous runs,
//!   making repeated exports append-only
//!
//! All processing is single-threaded and in-memory; exports are bounded by
//! device storage, thousands of records at most.
//!
//! # Example
//!
//! ```rust
//! use clipmark_core::{classify, ClippingsParser, ExistingHashIndex, Library, Reconciler};
//!
//! let stream = "\
//! Deep Work (Cal Newport)
//! - Your Highlight at location 1016-1018 | Added on Friday, 14 August 2015 10:50:35
//!
//! Clarity about what matters provides clarity about what does not.
//! ==========
//! ";
//!
//! let notes = ClippingsParser::new().parse(stream)?;
//! let mut library = Library::from_notes(notes);
//!
//! let warnings = Reconciler::new().reconcile_all(library.books_mut());
//! assert!(warnings.is_empty());
//!
//! let index = ExistingHashIndex::new();
//! let report = classify(&library.books()[0], &index);
//! assert_eq!(report.new_count(), 1);
//! # Ok::<(), clipmark_core::ParseError>(())
//! ```

pub mod dedup;
pub mod error;
pub mod filename;
pub mod hash;
pub mod library;
pub mod note;
pub mod parse;
pub mod reconcile;
pub mod similarity;

pub use dedup::{classify, BookReport, ExistingHashIndex, NoteStatus};
pub use error::{ParseError, Result};
pub use hash::content_hash;
pub use library::{Book, Library};
pub use note::{NoteType, RawNote, UNKNOWN_AUTHOR};
pub use parse::ClippingsParser;
pub use reconcile::{OverlapWarning, Reconciler};
pub use similarity::lcs_len;
