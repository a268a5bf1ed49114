// Suggestion generation
//
// Produces spelling correction candidates for misspelled words by applying
// edit operations (case change, table replacement, swap, insertion, deletion,
// splitting) and validating them through the speller.
//
// Architecture:
//   - `generators`: individual edit-operation generators (SuggestionGenerator trait)
//   - `status`: tracking object for abort conditions, cost budget, deduplication
//   - `strategy`: orchestrator that composes generators for a loaded dictionary

pub mod generators;
pub mod status;
pub mod strategy;

pub use generators::SuggestionGenerator;
pub use status::{Suggestion, SuggestionKind, SuggestionStatus};
pub use strategy::{DEFAULT_MAX_COST, SuggestionStrategy};
