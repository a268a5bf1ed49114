// Shared result enums and limits

/// Outcome of checking a single word against the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpellResult {
    /// Word is correctly spelled.
    Ok,
    /// Word is correct if the first letter is capitalized.
    CapitalizeFirst,
    /// Word is correct but must never be offered as a suggestion.
    NoSuggest,
    /// Word is misspelled.
    Failed,
}

impl SpellResult {
    /// Whether the word is accepted as written.
    pub fn is_correct(self) -> bool {
        matches!(self, SpellResult::Ok | SpellResult::NoSuggest)
    }
}

/// Result of a runtime dictionary mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayStatus {
    /// The word is now accepted.
    Added,
    /// The word is now rejected.
    Removed,
    /// The word was already accepted; nothing changed.
    Duplicate,
    /// The word to remove is not known.
    NotFound,
    /// The exemplar passed to an affix-aware add is not in the dictionary.
    ExemplarNotFound,
    /// The word is empty or too long to store.
    InvalidWord,
}

impl OverlayStatus {
    /// Whether the mutation left the overlay in the requested state.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            OverlayStatus::Added | OverlayStatus::Removed | OverlayStatus::Duplicate
        )
    }

    /// Integer status for C callers: 0 on success, a positive code otherwise.
    pub fn code(self) -> i32 {
        match self {
            OverlayStatus::Added | OverlayStatus::Removed | OverlayStatus::Duplicate => 0,
            OverlayStatus::NotFound => 1,
            OverlayStatus::ExemplarNotFound => 2,
            OverlayStatus::InvalidWord => 3,
        }
    }
}

/// Maximum number of characters in a checked word.
pub const MAX_WORD_CHARS: usize = 100;

/// Default cap on the number of suggestions returned for one word.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_results() {
        assert!(SpellResult::Ok.is_correct());
        assert!(SpellResult::NoSuggest.is_correct());
        assert!(!SpellResult::CapitalizeFirst.is_correct());
        assert!(!SpellResult::Failed.is_correct());
    }

    #[test]
    fn spell_result_ordering() {
        assert!(SpellResult::Ok < SpellResult::Failed);
    }

    #[test]
    fn overlay_status_codes() {
        assert_eq!(OverlayStatus::Added.code(), 0);
        assert_eq!(OverlayStatus::Duplicate.code(), 0);
        assert_eq!(OverlayStatus::NotFound.code(), 1);
        assert_eq!(OverlayStatus::ExemplarNotFound.code(), 2);
        assert!(!OverlayStatus::InvalidWord.is_success());
        assert!(OverlayStatus::Removed.is_success());
    }
}
