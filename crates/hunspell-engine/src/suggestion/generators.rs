// Individual suggestion generators: each applies one class of edit operation
// to produce candidate words, then validates them via the speller.

use hunspell_core::character::{simple_lower, simple_upper};
use hunspell_core::enums::SpellResult;
use hunspell_dict::Replacement as TableEntry;

use super::status::{SuggestionKind, SuggestionStatus};
use crate::speller::Speller;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Trait for individual suggestion generators.
///
/// Each generator produces candidate words by applying one class of edit
/// operation to the misspelled word, then validates each candidate through
/// the speller.
pub trait SuggestionGenerator: Send + Sync {
    /// Generate suggestions for the word tracked by `status`, using `speller`
    /// to validate candidates.
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(simple_upper(first)).chain(chars).collect(),
        None => String::new(),
    }
}

/// Spell check `candidate` exactly as given and record it when it passes.
///
/// A candidate that is only valid capitalized is recorded capitalized;
/// NOSUGGEST words are never recorded.
pub fn suggest_verbatim(
    speller: &dyn Speller,
    status: &mut SuggestionStatus<'_>,
    candidate: String,
    kind: SuggestionKind,
) {
    if status.should_abort() {
        return;
    }
    let before = speller.work();
    let result = speller.spell(&candidate);
    status.charge();
    status.charge_lookups(speller.work().saturating_sub(before));
    match result {
        SpellResult::Ok => status.add_suggestion(candidate, kind),
        SpellResult::CapitalizeFirst => status.add_suggestion(capitalize(&candidate), kind),
        SpellResult::NoSuggest | SpellResult::Failed => {}
    }
}

/// Check a candidate built from the working spelling: the caller's case
/// pattern is put back first.
pub fn suggest_for_buffer(
    speller: &dyn Speller,
    status: &mut SuggestionStatus<'_>,
    buffer: &[char],
    kind: SuggestionKind,
) {
    if status.should_abort() {
        return;
    }
    let word: String = buffer.iter().collect();
    let candidate = status.recase(&word);
    suggest_verbatim(speller, status, candidate, kind);
}

// ---------------------------------------------------------------------------
// CaseChange
// ---------------------------------------------------------------------------

/// Try the word as written, then lowercased and capitalized.
///
/// Catches words that are only wrong because of their case: `paris` is
/// offered as `Paris`, `hELLO` as `hello`.
pub struct CaseChange;

impl SuggestionGenerator for CaseChange {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let original = status.original();
        let lower: String = original.chars().map(simple_lower).collect();
        let capitalized = capitalize(&lower);
        for candidate in [original.to_string(), lower, capitalized] {
            suggest_verbatim(speller, status, candidate, SuggestionKind::CaseChange);
        }
    }
}

// ---------------------------------------------------------------------------
// TableReplacement
// ---------------------------------------------------------------------------

/// Apply every `REP` entry at every place it matches.
///
/// Anchored entries only match at the start or end of the word. A
/// replacement may introduce a space, producing a two-word candidate.
pub struct TableReplacement {
    pub replacements: Vec<TableEntry>,
}

impl SuggestionGenerator for TableReplacement {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word: String = status.word().iter().collect();
        for rep in &self.replacements {
            if rep.from.is_empty() {
                continue;
            }
            for (at, _) in word.match_indices(rep.from.as_str()) {
                if status.should_abort() {
                    return;
                }
                let end = at + rep.from.len();
                if (rep.anchor_start && at != 0) || (rep.anchor_end && end != word.len()) {
                    continue;
                }
                let mut candidate = String::with_capacity(word.len() + rep.to.len());
                candidate.push_str(&word[..at]);
                candidate.push_str(&rep.to);
                candidate.push_str(&word[end..]);
                let buffer: Vec<char> = candidate.chars().collect();
                suggest_for_buffer(speller, status, &buffer, SuggestionKind::TableReplacement);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MapRelated
// ---------------------------------------------------------------------------

/// Substitute related characters declared together in a `MAP` group.
///
/// Group members may be multi-character sequences, e.g. `(ss)` next to `ß`.
pub struct MapRelated {
    pub groups: Vec<Vec<String>>,
}

impl SuggestionGenerator for MapRelated {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word: String = status.word().iter().collect();
        for group in &self.groups {
            for (i, from) in group.iter().enumerate() {
                if from.is_empty() {
                    continue;
                }
                for (at, _) in word.match_indices(from.as_str()) {
                    for (j, to) in group.iter().enumerate() {
                        if i == j {
                            continue;
                        }
                        if status.should_abort() {
                            return;
                        }
                        let mut candidate = String::with_capacity(word.len() + to.len());
                        candidate.push_str(&word[..at]);
                        candidate.push_str(to);
                        candidate.push_str(&word[at + from.len()..]);
                        let buffer: Vec<char> = candidate.chars().collect();
                        suggest_for_buffer(speller, status, &buffer, SuggestionKind::MapRelated);
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// KeyboardAdjacent
// ---------------------------------------------------------------------------

/// Replace each character by its neighbours on the keyboard: left and
/// right in the same row, and the same column in the rows above and below.
pub struct KeyboardAdjacent {
    pub rows: Vec<Vec<char>>,
}

impl KeyboardAdjacent {
    fn neighbours(&self, c: char) -> Vec<char> {
        let mut found = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            let Some(col) = row.iter().position(|&k| k == c) else {
                continue;
            };
            if col > 0 {
                found.push(row[col - 1]);
            }
            if let Some(&right) = row.get(col + 1) {
                found.push(right);
            }
            if r > 0 {
                if let Some(&above) = self.rows[r - 1].get(col) {
                    found.push(above);
                }
            }
            if let Some(&below) = self.rows.get(r + 1).and_then(|next| next.get(col)) {
                found.push(below);
            }
        }
        found
    }
}

impl SuggestionGenerator for KeyboardAdjacent {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let mut buffer: Vec<char> = word.to_vec();
        for i in 0..word.len() {
            for near in self.neighbours(simple_lower(word[i])) {
                if status.should_abort() {
                    return;
                }
                if near == word[i] {
                    continue;
                }
                buffer[i] = near;
                suggest_for_buffer(speller, status, &buffer, SuggestionKind::KeyboardAdjacent);
            }
            buffer[i] = word[i];
        }
    }
}

// ---------------------------------------------------------------------------
// Replacement
// ---------------------------------------------------------------------------

/// Replace each character by every `TRY` character in turn.
///
/// The character set is ordered by frequency, so common letters are
/// tested first.
pub struct Replacement {
    pub characters: Vec<char>,
}

impl SuggestionGenerator for Replacement {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let mut buffer: Vec<char> = word.to_vec();
        for i in 0..word.len() {
            for &to in &self.characters {
                if status.should_abort() {
                    return;
                }
                if to == simple_lower(word[i]) {
                    continue;
                }
                buffer[i] = to;
                suggest_for_buffer(speller, status, &buffer, SuggestionKind::CharacterReplacement);
            }
            buffer[i] = word[i];
        }
    }
}

// ---------------------------------------------------------------------------
// Swap
// ---------------------------------------------------------------------------

/// Try swapping pairs of characters within a distance limit.
///
/// The maximum swap distance depends on word length:
/// - Words <= 8 chars: max distance 10 (effectively all pairs)
/// - Longer words: `50 / word_len`
///
/// Neighbouring swaps rank as transpositions, the rest as distant swaps.
pub struct Swap;

impl SuggestionGenerator for Swap {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let wlen = status.word_len();
        if wlen < 2 {
            return;
        }
        let max_distance = if wlen <= 8 { 10 } else { 50 / wlen };
        if max_distance == 0 {
            return;
        }
        let mut buffer: Vec<char> = word.to_vec();

        for i in 0..wlen {
            for j in (i + 1)..wlen {
                if status.should_abort() {
                    return;
                }
                if j - i > max_distance {
                    break;
                }
                if simple_lower(word[i]) == simple_lower(word[j]) {
                    continue;
                }
                let kind = if j == i + 1 {
                    SuggestionKind::Transposition
                } else {
                    SuggestionKind::DistantSwap
                };
                buffer.swap(i, j);
                suggest_for_buffer(speller, status, &buffer, kind);
                buffer.swap(i, j);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

/// Try inserting each `TRY` character at every position in the word.
///
/// Inserting a copy of a neighbouring character is only tried once per
/// run of that character.
pub struct Insertion {
    pub characters: Vec<char>,
}

impl SuggestionGenerator for Insertion {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let wlen = status.word_len();
        if wlen == 0 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen + 1);

        for &ins in &self.characters {
            for j in 0..=wlen {
                if status.should_abort() {
                    return;
                }
                // Inserting before a copy of itself equals inserting after it.
                if j < wlen && ins == simple_lower(word[j]) {
                    continue;
                }
                buffer.clear();
                buffer.extend_from_slice(&word[..j]);
                buffer.push(ins);
                buffer.extend_from_slice(&word[j..]);
                suggest_for_buffer(speller, status, &buffer, SuggestionKind::Insertion);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Try deleting one character at each position.
///
/// Skips positions where the deleted character is the same as its predecessor
/// (case-insensitive), since that would produce the same candidate as a
/// previous iteration.
pub struct Deletion;

impl SuggestionGenerator for Deletion {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let wlen = status.word_len();
        if wlen < 2 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen - 1);

        for i in 0..wlen {
            if status.should_abort() {
                break;
            }
            if i > 0 && simple_lower(word[i]) == simple_lower(word[i - 1]) {
                continue;
            }
            buffer.clear();
            buffer.extend_from_slice(&word[..i]);
            buffer.extend_from_slice(&word[i + 1..]);
            suggest_for_buffer(speller, status, &buffer, SuggestionKind::Deletion);
        }
    }
}

// ---------------------------------------------------------------------------
// DeleteTwo
// ---------------------------------------------------------------------------

/// Remove a repeated two-character sequence: `aluealue` -> `alue`,
/// `bananana` -> `banana`.
pub struct DeleteTwo;

impl SuggestionGenerator for DeleteTwo {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let wlen = status.word_len();
        if wlen < 4 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen - 2);

        for i in 0..wlen - 3 {
            if status.should_abort() {
                break;
            }
            if word[i] != word[i + 2] || word[i + 1] != word[i + 3] {
                continue;
            }
            buffer.clear();
            buffer.extend_from_slice(&word[..i]);
            buffer.extend_from_slice(&word[i + 2..]);
            suggest_for_buffer(speller, status, &buffer, SuggestionKind::DoubledPair);
        }
    }
}

// ---------------------------------------------------------------------------
// SplitWord
// ---------------------------------------------------------------------------

/// Try splitting the word into two words separated by a space.
///
/// Split points run from right to left and both parts are at least two
/// characters long; the speller validates the two-word phrase.
pub struct SplitWord;

impl SuggestionGenerator for SplitWord {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word();
        let wlen = status.word_len();
        if wlen < 4 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen + 1);

        for split in (2..=wlen - 2).rev() {
            if status.should_abort() {
                break;
            }
            if word[split - 1] == '-' || word[split] == '-' {
                continue;
            }
            buffer.clear();
            buffer.extend_from_slice(&word[..split]);
            buffer.push(' ');
            buffer.extend_from_slice(&word[split..]);
            suggest_for_buffer(speller, status, &buffer, SuggestionKind::Split);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
