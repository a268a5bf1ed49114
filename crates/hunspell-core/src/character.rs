// Character classification and normalization helpers

// ---------------------------------------------------------------------------
// Case mapping
//
// Unicode case mapping may produce multiple characters (e.g. 'ß' -> "SS").
// The "simple" mappings below keep a one-to-one correspondence so that
// character buffers never change length.
// ---------------------------------------------------------------------------

/// Convert a character to its simple lowercase equivalent.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character is an uppercase letter.
pub fn is_upper(c: char) -> bool {
    c != simple_lower(c) || c == '\u{018F}' // LATIN CAPITAL LETTER SCHWA
}

/// Check whether a character is a lowercase letter.
pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}

// ---------------------------------------------------------------------------
// Word-level helpers
// ---------------------------------------------------------------------------

/// Check whether a word is a number: digits, optionally separated by
/// single `.`, `,` or `-` characters, with an optional leading sign.
pub fn is_numeric(word: &str) -> bool {
    let body = word.strip_prefix(&['-', '+'][..]).unwrap_or(word);
    let mut saw_digit = false;
    let mut prev_separator = true;
    for c in body.chars() {
        if c.is_ascii_digit() {
            saw_digit = true;
            prev_separator = false;
        } else if matches!(c, '.' | ',' | '-') {
            if prev_separator {
                return false;
            }
            prev_separator = true;
        } else {
            return false;
        }
    }
    saw_digit && !prev_separator
}

/// Map typographic apostrophe and hyphen variants to their ASCII forms.
pub fn normalize_typography(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{02BC}' | '\u{2018}' => '\'',
            '\u{2010}' | '\u{2011}' => '-',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Case functions --

    #[test]
    fn simple_lower_basic() {
        assert_eq!(simple_lower('A'), 'a');
        assert_eq!(simple_lower('a'), 'a');
        assert_eq!(simple_lower('\u{00C4}'), '\u{00E4}'); // Ä -> ä
    }

    #[test]
    fn simple_upper_basic() {
        assert_eq!(simple_upper('z'), 'Z');
        assert_eq!(simple_upper('\u{00F6}'), '\u{00D6}'); // ö -> Ö
    }

    #[test]
    fn simple_upper_keeps_length() {
        // 'ß' uppercases to "SS"; the simple mapping takes the first char
        assert_eq!(simple_upper('\u{00DF}'), 'S');
    }

    #[test]
    fn is_upper_and_lower() {
        assert!(is_upper('A'));
        assert!(is_upper('\u{018F}'));
        assert!(!is_upper('a'));
        assert!(!is_upper('1'));
        assert!(is_lower('a'));
        assert!(!is_lower('A'));
        assert!(!is_lower('\''));
    }

    // -- Word helpers --

    #[test]
    fn numbers_are_recognized() {
        assert!(is_numeric("42"));
        assert!(is_numeric("3.14"));
        assert!(is_numeric("1,000,000"));
        assert!(is_numeric("-7"));
        assert!(is_numeric("2024-10-18"));
    }

    #[test]
    fn non_numbers_are_rejected() {
        assert!(!is_numeric(""));
        assert!(!is_numeric("-"));
        assert!(!is_numeric("1."));
        assert!(!is_numeric("1..2"));
        assert!(!is_numeric("12th"));
        assert!(!is_numeric(".5"));
    }

    #[test]
    fn typography_is_normalized() {
        assert_eq!(normalize_typography("don\u{2019}t"), "don't");
        assert_eq!(normalize_typography("e\u{2010}mail"), "e-mail");
        assert_eq!(normalize_typography("plain"), "plain");
    }
}
