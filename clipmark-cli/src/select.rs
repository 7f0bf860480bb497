//! Interactive book selection
//!
//! The extract pipeline only writes books the user picked. Selection is a
//! plain numbered prompt on stdin; `--all` and `--books` bypass it so the
//! command stays scriptable.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::error::CliError;

/// Which books the user wants written.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Every book in the library.
    All,
    /// Only books whose title is in the set.
    Titles(HashSet<String>),
}

impl Selection {
    /// Predicate handed to the core's selection hook.
    pub fn contains(&self, title: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Titles(titles) => titles.contains(title),
        }
    }

    /// Non-interactive selection from explicit `--books` titles.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Titles(titles.into_iter().map(Into::into).collect())
    }
}

/// Prompt the user with a numbered menu of unique titles.
///
/// `0` selects everything; otherwise space-separated numbers pick books.
/// Invalid input re-prompts, mirroring how the menu behaves on-device
/// tools users already know.
pub fn prompt_selection(titles: &[&str]) -> Result<Selection> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_selection_io(titles, &mut input, &mut output)
}

/// Testable inner loop over explicit reader/writer handles.
fn prompt_selection_io<R, W>(titles: &[&str], input: &mut R, output: &mut W) -> Result<Selection>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "\nSelect a book (or books) to output:")?;
    writeln!(output, "[0]: All books")?;
    for (i, title) in titles.iter().enumerate() {
        writeln!(output, "[{}]: {}", i + 1, title)?;
    }

    loop {
        write!(output, "\nInput one or more numbers, separated by a space: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(CliError::SelectionError("stdin closed".to_string()).into());
        }

        let numbers: std::result::Result<Vec<usize>, _> =
            line.split_whitespace().map(str::parse).collect();

        let numbers = match numbers {
            Ok(n) if !n.is_empty() => n,
            _ => {
                writeln!(output, "Please enter valid numbers separated by spaces")?;
                continue;
            }
        };

        if numbers.contains(&0) {
            return Ok(Selection::All);
        }
        if numbers.iter().any(|&n| n > titles.len()) {
            writeln!(
                output,
                "Please enter numbers between 0 and {}",
                titles.len()
            )?;
            continue;
        }

        let picked = numbers
            .into_iter()
            .map(|n| titles[n - 1].to_string())
            .collect();
        return Ok(Selection::Titles(picked));
    }
}
