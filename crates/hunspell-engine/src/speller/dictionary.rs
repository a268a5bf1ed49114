// Dictionary spell checking: case ladder, reductions, special flags and
// compounds for a single token

use std::cell::Cell;

use hunspell_core::case::{CaseType, CaseVariant, case_ladder, detect_case, with_case};
use hunspell_core::enums::SpellResult;
use hunspell_dict::AffixTable;

use super::Speller;
use super::compound::{CompoundChecker, CompoundPart};
use crate::lookup::WordLookup;
use crate::morphology::reduce::{Reduction, reduce};

/// Checks single tokens against the affix table and a word lookup.
#[derive(Clone, Copy)]
pub struct DictionarySpeller<'a> {
    table: &'a AffixTable,
    lookup: &'a dyn WordLookup,
    meter: Option<&'a Cell<usize>>,
}

impl<'a> DictionarySpeller<'a> {
    pub fn new(table: &'a AffixTable, lookup: &'a dyn WordLookup) -> Self {
        Self {
            table,
            lookup,
            meter: None,
        }
    }

    /// Count compound part lookups in `meter`.
    pub fn with_meter(mut self, meter: &'a Cell<usize>) -> Self {
        self.meter = Some(meter);
        self
    }

    /// Compound part lookups made so far, when metered.
    pub fn work(&self) -> usize {
        self.meter.map_or(0, Cell::get)
    }

    pub fn table(&self) -> &'a AffixTable {
        self.table
    }

    /// Whether a reduction found under `variant` is a word on its own.
    fn stands_alone(&self, reduction: &Reduction<'_>, variant: CaseVariant) -> bool {
        let special = self.table.special_flags();
        let entry = reduction.entry;
        if entry.has_flag(special.forbidden_word) || entry.has_flag(special.only_in_compound) {
            return false;
        }
        variant == CaseVariant::Exact || !entry.has_flag(special.keep_case)
    }

    /// Reductions of `word` accepted as standalone words, over the case
    /// ladder. `None` when the word, or a case variant of it, is forbidden
    /// or was removed.
    pub fn accepted(&self, word: &str) -> Option<Vec<Reduction<'a>>> {
        let forbidden = self.table.special_flags().forbidden_word;
        let mut found = Vec::new();
        for (variant, spelling) in case_ladder(word) {
            if self.lookup.is_hidden(&spelling) {
                return None;
            }
            if self
                .lookup
                .lookup(&spelling)
                .is_some_and(|entry| entry.has_flag(forbidden))
            {
                return None;
            }
            found.extend(
                reduce(self.table, self.lookup, &spelling)
                    .into_iter()
                    .filter(|r| self.stands_alone(r, variant)),
            );
        }
        Some(found)
    }

    /// Compound split of `word`, trying its case variants in ladder order.
    pub fn compound(&self, word: &str) -> Option<Vec<CompoundPart<'a>>> {
        if !self.table.compound().is_enabled() {
            return None;
        }
        let checker = CompoundChecker::new(self.table, self.lookup).with_meter(self.meter);
        case_ladder(word)
            .into_iter()
            .find_map(|(_, spelling)| checker.find(&spelling))
    }

    fn check_cased(&self, word: &str) -> SpellResult {
        let Some(found) = self.accepted(word) else {
            return SpellResult::Failed;
        };
        if !found.is_empty() {
            let no_suggest = self.table.special_flags().no_suggest;
            return if found.iter().all(|r| r.entry.has_flag(no_suggest)) {
                SpellResult::NoSuggest
            } else {
                SpellResult::Ok
            };
        }
        if self.compound(word).is_some() {
            return SpellResult::Ok;
        }
        SpellResult::Failed
    }

    /// Check one token. A lowercase token that is only valid capitalized
    /// reports [`SpellResult::CapitalizeFirst`].
    pub fn check_form(&self, word: &str) -> SpellResult {
        if word.is_empty() {
            return SpellResult::Failed;
        }
        let result = self.check_cased(word);
        if result != SpellResult::Failed || detect_case(word) != CaseType::AllLower {
            return result;
        }
        let capitalized = with_case(word, CaseType::FirstUpper);
        if capitalized != word && self.check_cased(&capitalized).is_correct() {
            SpellResult::CapitalizeFirst
        } else {
            SpellResult::Failed
        }
    }
}

impl Speller for DictionarySpeller<'_> {
    fn spell(&self, word: &str) -> SpellResult {
        self.check_form(word)
    }
}
