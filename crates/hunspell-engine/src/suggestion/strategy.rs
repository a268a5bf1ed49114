// Suggestion strategy orchestration: generator order and cost budget

use hunspell_dict::{AffixTable, DictionaryStore};

use super::generators::*;
use super::status::SuggestionStatus;
use crate::speller::Speller;

/// Spell checks one suggestion request may spend before giving up.
pub const DEFAULT_MAX_COST: usize = 2000;

/// A suggestion strategy holds primary and secondary generator lists
/// and orchestrates them with a cost budget.
pub struct SuggestionStrategy {
    /// Maximum computational cost budget.
    max_cost: usize,
    /// Primary generators -- run first; if any produce suggestions, secondaries are skipped.
    primary_generators: Vec<Box<dyn SuggestionGenerator>>,
    /// Secondary generators -- run only if primaries produced nothing.
    generators: Vec<Box<dyn SuggestionGenerator>>,
}

impl SuggestionStrategy {
    pub fn new(
        max_cost: usize,
        primary_generators: Vec<Box<dyn SuggestionGenerator>>,
        generators: Vec<Box<dyn SuggestionGenerator>>,
    ) -> Self {
        Self {
            max_cost,
            primary_generators,
            generators,
        }
    }

    /// The strategy for a loaded dictionary: a case fix wins outright,
    /// otherwise the table-driven and edit generators run in rank order.
    ///
    /// Without a `TRY` line the dictionary's own letters, most frequent
    /// first, are used for replacement and insertion.
    pub fn for_table(table: &AffixTable, store: &DictionaryStore, max_cost: usize) -> Self {
        let characters = if table.try_chars().is_empty() {
            store.frequent_chars()
        } else {
            table.try_chars().to_vec()
        };
        Self::new(
            max_cost,
            vec![Box::new(CaseChange)],
            vec![
                Box::new(TableReplacement {
                    replacements: table.replacements().to_vec(),
                }),
                Box::new(MapRelated {
                    groups: table.map_groups().to_vec(),
                }),
                Box::new(KeyboardAdjacent {
                    rows: table.keyboard_rows().to_vec(),
                }),
                Box::new(Replacement {
                    characters: characters.clone(),
                }),
                Box::new(Swap),
                Box::new(Insertion { characters }),
                Box::new(Deletion),
                Box::new(DeleteTwo),
                Box::new(SplitWord),
            ],
        )
    }

    pub fn max_cost(&self) -> usize {
        self.max_cost
    }

    pub fn set_max_cost(&mut self, max_cost: usize) {
        self.max_cost = max_cost;
    }

    /// Run the strategy: execute primary generators, then secondary if no
    /// suggestions were found by primaries. Results are ranked by kind.
    pub fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        status.set_max_cost(self.max_cost);

        for generator in &self.primary_generators {
            if status.should_abort() {
                break;
            }
            generator.generate(speller, status);
        }
        if status.suggestion_count() == 0 {
            for generator in &self.generators {
                if status.should_abort() {
                    break;
                }
                generator.generate(speller, status);
            }
        }
        status.sort_suggestions();
    }
}
