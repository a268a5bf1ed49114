// Case pattern detection, conversion and the lookup case ladder

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// Classification of character casing within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No letters found in the word (only digits, punctuation, etc.).
    NoLetters,
    /// All letters are lowercase: "house".
    AllLower,
    /// First letter is uppercase, rest are lowercase: "House".
    FirstUpper,
    /// Mixed case that does not fit other patterns: "hoUse", "McDonald".
    Complex,
    /// All letters are uppercase: "HOUSE".
    AllUpper,
}

/// Detect the case pattern of a word.
///
/// Non-letter characters (digits, punctuation) are ignored when
/// determining the pattern.
pub fn detect_case(word: &str) -> CaseType {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return CaseType::NoLetters;
    };

    let mut first_uc = false;
    let mut rest_lc = true;
    let mut all_uc = true;
    let mut no_letters = true;

    if is_upper(first) {
        first_uc = true;
        no_letters = false;
    }
    if is_lower(first) {
        all_uc = false;
        no_letters = false;
    }

    for c in chars {
        if is_upper(c) {
            no_letters = false;
            rest_lc = false;
        }
        if is_lower(c) {
            all_uc = false;
            no_letters = false;
        }
    }

    if no_letters {
        return CaseType::NoLetters;
    }
    if all_uc {
        return CaseType::AllUpper;
    }
    if !rest_lc {
        return CaseType::Complex;
    }
    if first_uc {
        CaseType::FirstUpper
    } else {
        CaseType::AllLower
    }
}

/// Apply a case transformation to a character buffer in place.
///
/// - `NoLetters` / `Complex` leave the buffer untouched.
/// - `AllLower` / `AllUpper` map every letter.
/// - `FirstUpper` uppercases the first character and lowercases the rest.
pub fn set_case(word: &mut [char], case_type: CaseType) {
    if word.is_empty() {
        return;
    }
    match case_type {
        CaseType::NoLetters | CaseType::Complex => {}
        CaseType::AllLower => {
            for c in word.iter_mut() {
                *c = simple_lower(*c);
            }
        }
        CaseType::AllUpper => {
            for c in word.iter_mut() {
                *c = simple_upper(*c);
            }
        }
        CaseType::FirstUpper => {
            word[0] = simple_upper(word[0]);
            for c in word[1..].iter_mut() {
                *c = simple_lower(*c);
            }
        }
    }
}

/// Return a copy of `word` with the given case pattern applied.
pub fn with_case(word: &str, case_type: CaseType) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    set_case(&mut chars, case_type);
    chars.into_iter().collect()
}

/// One rung of the case ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseVariant {
    Exact,
    Lower,
    Capitalized,
}

/// Case variants under which a word may be looked up, in fixed order.
///
/// The input's own pattern restricts the ladder: a lowercase word is only
/// tried as written, a capitalized word may also match a lowercase entry,
/// and an all-caps word may match a lowercase or capitalized entry.
/// Variants that produce an already listed spelling are skipped.
pub fn case_ladder(word: &str) -> Vec<(CaseVariant, String)> {
    let permitted: &[CaseVariant] = match detect_case(word) {
        CaseType::NoLetters | CaseType::AllLower | CaseType::Complex => &[CaseVariant::Exact],
        CaseType::FirstUpper => &[CaseVariant::Exact, CaseVariant::Lower],
        CaseType::AllUpper => &[
            CaseVariant::Exact,
            CaseVariant::Lower,
            CaseVariant::Capitalized,
        ],
    };

    let mut ladder: Vec<(CaseVariant, String)> = Vec::with_capacity(permitted.len());
    for &variant in permitted {
        let spelling = match variant {
            CaseVariant::Exact => word.to_string(),
            CaseVariant::Lower => with_case(word, CaseType::AllLower),
            CaseVariant::Capitalized => with_case(word, CaseType::FirstUpper),
        };
        if ladder.iter().any(|(_, seen)| *seen == spelling) {
            continue;
        }
        ladder.push((variant, spelling));
    }
    ladder
}
