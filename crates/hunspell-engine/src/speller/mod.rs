// Spell checking

pub mod compound;
pub mod dictionary;
pub mod pipeline;

use hunspell_core::enums::SpellResult;

/// Trait for spell checkers.
///
/// Suggestion generators only talk to this trait, so they can be tested
/// against a fixed word list instead of a loaded dictionary.
pub trait Speller {
    /// Check one word as written.
    fn spell(&self, word: &str) -> SpellResult;

    /// Running count of the lookups made by all checks so far, used to
    /// charge expensive checks more than cheap ones.
    fn work(&self) -> usize {
        0
    }
}
