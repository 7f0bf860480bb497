//! Input file location and reading

mod clippings;

pub use clippings::{locate_clippings, read_clippings};
