// Suggestion status tracking: abort conditions, cost budget, deduplication

use hashbrown::HashSet;
use hunspell_core::case::{CaseType, with_case};

/// The transformation that produced a suggestion.
///
/// The declaration order is the ranking order: suggestions are stably
/// sorted by kind once generation is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuggestionKind {
    /// The word only needed a case correction.
    CaseChange,
    /// A `REP` table replacement.
    TableReplacement,
    /// A substitution within a `MAP` group of related characters.
    MapRelated,
    /// A substitution by a neighbouring key.
    KeyboardAdjacent,
    /// A substitution by a `TRY` character.
    CharacterReplacement,
    /// Two adjacent characters swapped.
    Transposition,
    /// Two characters a few positions apart swapped.
    DistantSwap,
    /// One character inserted.
    Insertion,
    /// One character deleted.
    Deletion,
    /// A doubled two-character sequence reduced to one.
    DoubledPair,
    /// The word split in two with a space.
    Split,
}

/// A suggestion candidate and the transformation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    pub kind: SuggestionKind,
}

/// Compound part lookups that cost as much as one spell check.
pub const LOOKUPS_PER_COST: usize = 10;

/// Tracks the state of suggestion generation: found suggestions, cost
/// budget and abort conditions.
///
/// Every spell check made while generating candidates charges one unit of
/// cost, plus one unit per [`LOOKUPS_PER_COST`] compound part lookups it
/// needed. When the budget runs out with nothing found, the search may go
/// on for as long again.
pub struct SuggestionStatus<'a> {
    /// The working spelling the generators edit.
    word: &'a [char],
    /// The word exactly as the caller wrote it.
    original: &'a str,
    /// Case pattern to put back on candidates built from a lowercased word.
    restore_case: Option<CaseType>,
    max_suggestions: usize,
    max_cost: usize,
    current_cost: usize,
    suggestions: Vec<Suggestion>,
    seen: HashSet<String>,
}

impl<'a> SuggestionStatus<'a> {
    pub fn new(word: &'a [char], original: &'a str, max_suggestions: usize) -> Self {
        Self {
            word,
            original,
            restore_case: None,
            max_suggestions,
            max_cost: 0,
            current_cost: 0,
            suggestions: Vec::with_capacity(max_suggestions),
            seen: HashSet::new(),
        }
    }

    /// Re-apply `case` to every candidate before it is recorded.
    pub fn with_restored_case(mut self, case: CaseType) -> Self {
        self.restore_case = Some(case);
        self
    }

    /// Returns `true` if no more suggestions should be generated.
    pub fn should_abort(&self) -> bool {
        if self.suggestions.len() >= self.max_suggestions {
            return true;
        }
        if self.current_cost < self.max_cost {
            return false;
        }
        !self.suggestions.is_empty() || self.current_cost >= 2 * self.max_cost
    }

    /// Count one spell check.
    pub fn charge(&mut self) {
        self.current_cost += 1;
    }

    /// Count the extra work of a check that made `lookups` compound part
    /// lookups.
    pub fn charge_lookups(&mut self, lookups: usize) {
        self.current_cost += lookups / LOOKUPS_PER_COST;
    }

    pub fn set_max_cost(&mut self, max_cost: usize) {
        self.max_cost = max_cost;
    }

    pub fn current_cost(&self) -> usize {
        self.current_cost
    }

    /// Put the caller's case pattern back on a candidate.
    pub fn recase(&self, candidate: &str) -> String {
        match self.restore_case {
            Some(case) => with_case(candidate, case),
            None => candidate.to_string(),
        }
    }

    /// Record a suggestion; the original word and repeats are ignored.
    pub fn add_suggestion(&mut self, word: String, kind: SuggestionKind) {
        if self.suggestions.len() >= self.max_suggestions {
            return;
        }
        if word == self.original || !self.seen.insert(word.clone()) {
            return;
        }
        self.suggestions.push(Suggestion { word, kind });
    }

    /// Stable sort by transformation kind; first-seen order within a kind.
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by_key(|s| s.kind);
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    pub fn max_suggestion_count(&self) -> usize {
        self.max_suggestions
    }

    /// The working spelling.
    pub fn word(&self) -> &'a [char] {
        self.word
    }

    pub fn word_len(&self) -> usize {
        self.word.len()
    }

    /// The word as the caller wrote it.
    pub fn original(&self) -> &'a str {
        self.original
    }

    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }
}
