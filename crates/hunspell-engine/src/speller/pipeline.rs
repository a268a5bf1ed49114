// Top-level spell check pipeline: overlay, normalization, phrases,
// numbers, abbreviation dots and BREAK patterns around the dictionary check

use hunspell_core::character::{is_numeric, normalize_typography};
use hunspell_core::enums::{MAX_WORD_CHARS, SpellResult};

use super::Speller;
use super::dictionary::DictionarySpeller;
use crate::overlay::OverlayState;

/// How deep BREAK splitting and dot trimming may recurse.
const MAX_BREAK_DEPTH: usize = 10;

/// Spell check options controlling how words are evaluated.
#[derive(Debug, Clone)]
pub struct SpellOptions {
    /// Accept numbers such as `42`, `3.14` or `1,000`.
    pub ignore_numbers: bool,
    /// Accept a word followed by abbreviation dots when the word is valid.
    pub ignore_dot: bool,
    /// Accept whitespace-separated phrases made of valid words.
    pub accept_phrases: bool,
}

impl Default for SpellOptions {
    fn default() -> Self {
        Self {
            ignore_numbers: true,
            ignore_dot: true,
            accept_phrases: true,
        }
    }
}

/// Expand typographic ligatures and map apostrophe and hyphen variants to
/// their ASCII forms.
pub fn normalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in normalize_typography(word).chars() {
        match c {
            '\u{FB00}' => out.push_str("ff"),
            '\u{FB01}' => out.push_str("fi"),
            '\u{FB02}' => out.push_str("fl"),
            '\u{FB03}' => out.push_str("ffi"),
            '\u{FB04}' => out.push_str("ffl"),
            '\u{FB06}' => out.push_str("st"),
            _ => out.push(c),
        }
    }
    out
}

/// Full check of caller input, layered over a [`DictionarySpeller`].
pub struct CheckPipeline<'a> {
    dictionary: DictionarySpeller<'a>,
    overlay: &'a OverlayState,
    options: &'a SpellOptions,
}

impl<'a> CheckPipeline<'a> {
    pub fn new(
        dictionary: DictionarySpeller<'a>,
        overlay: &'a OverlayState,
        options: &'a SpellOptions,
    ) -> Self {
        Self {
            dictionary,
            overlay,
            options,
        }
    }

    pub fn dictionary(&self) -> &DictionarySpeller<'a> {
        &self.dictionary
    }

    /// The spelling to mark as removed so that an accepted `word` is
    /// rejected afterwards: normalized, and without abbreviation dots when
    /// only the bare word is valid.
    pub fn removal_key(&self, word: &str) -> String {
        let normalized = normalize(word);
        if self.options.ignore_dot {
            let trimmed = normalized.trim_end_matches('.');
            if !trimmed.is_empty()
                && trimmed.len() < normalized.len()
                && self.verdict(&normalized).is_none()
                && !self.dictionary.check_form(&normalized).is_correct()
            {
                return trimmed.to_string();
            }
        }
        normalized
    }

    fn verdict(&self, word: &str) -> Option<SpellResult> {
        self.overlay.verdict(word).map(|accepted| {
            if accepted {
                SpellResult::Ok
            } else {
                SpellResult::Failed
            }
        })
    }

    fn spell_token(&self, word: &str, depth: usize) -> SpellResult {
        if let Some(result) = self.verdict(word) {
            return result;
        }
        let result = self.dictionary.check_form(word);
        if result.is_correct() {
            return result;
        }
        if self.options.ignore_numbers && is_numeric(word) {
            return SpellResult::Ok;
        }
        if depth >= MAX_BREAK_DEPTH {
            return result;
        }
        if self.options.ignore_dot {
            let trimmed = word.trim_end_matches('.');
            if trimmed.len() < word.len() && !trimmed.is_empty() {
                let without_dots = self.spell_token(trimmed, depth + 1);
                if without_dots.is_correct() {
                    return without_dots;
                }
            }
        }
        if self.breaks_into_words(word, depth) {
            return SpellResult::Ok;
        }
        result
    }

    /// Whether a BREAK pattern splits `word` into valid pieces.
    ///
    /// `^x` strips `x` from the start, `x$` from the end; any other
    /// pattern splits at an inner occurrence and both sides must be valid.
    fn breaks_into_words(&self, word: &str, depth: usize) -> bool {
        let valid = |piece: &str| !piece.is_empty() && self.spell_token(piece, depth + 1).is_correct();
        for pattern in self.dictionary.table().break_patterns() {
            if let Some(literal) = pattern.strip_prefix('^') {
                if !literal.is_empty() && word.strip_prefix(literal).is_some_and(valid) {
                    return true;
                }
            } else if let Some(literal) = pattern.strip_suffix('$') {
                if !literal.is_empty() && word.strip_suffix(literal).is_some_and(valid) {
                    return true;
                }
            } else if !pattern.is_empty() {
                for (at, _) in word.match_indices(pattern.as_str()) {
                    let (left, right) = (&word[..at], &word[at + pattern.len()..]);
                    if valid(left) && valid(right) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Speller for CheckPipeline<'_> {
    fn spell(&self, word: &str) -> SpellResult {
        if word.is_empty() {
            return SpellResult::Failed;
        }
        if let Some(result) = self.verdict(word) {
            return result;
        }
        let normalized = normalize(word);
        if normalized.chars().count() > MAX_WORD_CHARS {
            return SpellResult::Failed;
        }
        if normalized.contains(char::is_whitespace) {
            if !self.options.accept_phrases {
                return SpellResult::Failed;
            }
            let mut tokens = normalized.split_whitespace().peekable();
            if tokens.peek().is_none() {
                return SpellResult::Failed;
            }
            return if tokens.all(|token| self.spell_token(token, 0).is_correct()) {
                SpellResult::Ok
            } else {
                SpellResult::Failed
            };
        }
        self.spell_token(&normalized, 0)
    }

    fn work(&self) -> usize {
        self.dictionary.work()
    }
}
