//! Output filename derivation

use unicode_normalization::UnicodeNormalization;

/// Characters stripped from filenames after NFKD normalization.
const UNSAFE_CHARS: &[char] = &['(', ')', '\'', '?', '!', ':'];

/// Hard cap on the short title, in characters.
const MAX_SHORT_TITLE: usize = 127;

/// Title truncated at the first subtitle separator.
///
/// Cuts at the first of `"|"`, `" - "`, `". "` (applied in that order),
/// then hard-caps at 127 characters. Keeps long subtitle-laden titles from
/// producing unwieldy filenames.
pub fn short_title(title: &str) -> String {
    let mut s = title;
    if let Some(i) = s.find('|') {
        s = &s[..i];
    }
    if let Some(i) = s.find(" - ") {
        s = &s[..i];
    }
    if let Some(i) = s.find(". ") {
        s = &s[..i];
    }

    if s.chars().count() > MAX_SHORT_TITLE {
        s.chars().take(MAX_SHORT_TITLE).collect()
    } else {
        s.to_string()
    }
}

/// Suggested `"<author> - <short title>.md"` name, sanitized for common
/// filesystems.
pub fn suggested_filename(author: &str, title: &str) -> String {
    sanitize(&format!("{} - {}.md", author, short_title(title).trim()))
}

/// NFKD-normalize and drop punctuation that trips up shells and syncers.
/// Combining marks produced by the decomposition are kept; only basic
/// diacritic handling is attempted.
pub fn sanitize(name: &str) -> String {
    name.nfkd().filter(|c| !UNSAFE_CHARS.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title_passes_through() {
        assert_eq!(
            suggested_filename("Jane Doe", "Deep Work"),
            "Jane Doe - Deep Work.md"
        );
    }

    #[test]
    fn truncates_at_pipe() {
        assert_eq!(short_title("Title | A Subtitle"), "Title ");
    }

    #[test]
    fn truncates_at_dash_separator() {
        assert_eq!(short_title("Title - A Subtitle"), "Title");
        // A hyphenated word is not a separator.
        assert_eq!(short_title("Well-Being"), "Well-Being");
    }

    #[test]
    fn truncates_at_sentence_break() {
        assert_eq!(short_title("Essays. Collected and Annotated"), "Essays");
    }

    #[test]
    fn applies_separators_in_order() {
        assert_eq!(short_title("Main | Sub - Subsub. End"), "Main ");
    }

    #[test]
    fn caps_very_long_titles() {
        let long = "x".repeat(300);
        assert_eq!(short_title(&long).chars().count(), 127);
    }

    #[test]
    fn strips_unsafe_punctuation() {
        assert_eq!(
            suggested_filename("Author", "Why? Because! (Maybe)"),
            "Author - Why Because Maybe.md"
        );
        assert_eq!(sanitize("It's: a test"), "Its a test");
    }

    #[test]
    fn normalizes_ligatures() {
        // NFKD decomposes the ﬁ ligature into plain "fi".
        assert_eq!(sanitize("ﬁle"), "file");
    }

    #[test]
    fn decomposes_diacritics_without_dropping_letters() {
        let cleaned = sanitize("Café");
        assert!(cleaned.starts_with("Cafe"));
    }
}
