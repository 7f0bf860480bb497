//! Core error types

use thiserror::Error;

/// Errors raised while parsing a clippings stream.
///
/// Parsing favors fast, loud failure over partial output: a structurally
/// broken record aborts the whole run. Only the annotation timestamp is
/// recovered locally (the raw string is retained when it fails to parse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line after a record header did not match the expected
    /// `- Your <Type> ... | Added on <date>` annotation pattern.
    #[error("record {record}: malformed annotation line: {line:?}")]
    MalformedRecord {
        /// 1-based index of the record in the stream
        record: usize,
        /// The offending line, for diagnostics
        line: String,
    },

    /// The stream ended in the middle of a record.
    #[error("record {record}: unexpected end of input")]
    UnexpectedEof {
        /// 1-based index of the truncated record
        record: usize,
    },
}

/// Result type for core parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
