// Compound word checking
//
// Two mechanisms, tried in order:
// - flag compounding: every part carries COMPOUNDFLAG, or the positional
//   COMPOUNDBEGIN / COMPOUNDMIDDLE / COMPOUNDEND flag for its place;
// - COMPOUNDRULE patterns over the flag sets of bare dictionary words.

use std::cell::Cell;

use hashbrown::{HashMap, HashSet};
use hunspell_dict::aff::CompoundSettings;
use hunspell_dict::{AffixKind, AffixTable, DictionaryEntry, Flag, RuleRef};

use crate::lookup::WordLookup;
use crate::morphology::reduce::{Reduction, reduce};

/// Maximum number of parts in one compound.
pub const MAX_COMPOUND_PARTS: usize = 16;

/// Maximum number of candidate parts looked up while splitting one word.
/// A word whose split needs more is treated as not a compound.
pub const MAX_COMPOUND_LOOKUPS: usize = 2000;

/// One part of an accepted compound word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundPart<'a> {
    /// The part as it appears in the compound.
    pub text: String,
    pub entry: &'a DictionaryEntry,
    /// Affix rules applied to the entry, innermost first.
    pub chain: Vec<RuleRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Position {
    First,
    Middle,
    Last,
}

/// Bookkeeping for one split attempt.
#[derive(Default)]
struct Search<'a> {
    /// `(offset, parts so far)` states with no valid continuation.
    dead_ends: HashSet<(usize, usize)>,
    /// Same for rule compounds, with the pattern states of every rule.
    rule_dead_ends: HashSet<(usize, usize, Vec<Vec<usize>>)>,
    /// Flag-compound parts already looked up, by byte range and position.
    parts: HashMap<(usize, usize, Position), Option<CompoundPart<'a>>>,
    lookups: usize,
}

impl Search<'_> {
    /// Take one lookup from the budget.
    fn spend(&mut self) -> bool {
        if self.lookups >= MAX_COMPOUND_LOOKUPS {
            return false;
        }
        self.lookups += 1;
        true
    }
}

pub struct CompoundChecker<'a> {
    table: &'a AffixTable,
    lookup: &'a dyn WordLookup,
    meter: Option<&'a Cell<usize>>,
}

impl<'a> CompoundChecker<'a> {
    pub fn new(table: &'a AffixTable, lookup: &'a dyn WordLookup) -> Self {
        Self {
            table,
            lookup,
            meter: None,
        }
    }

    /// Add the number of part lookups of every split attempt to `meter`.
    pub fn with_meter(mut self, meter: Option<&'a Cell<usize>>) -> Self {
        self.meter = meter;
        self
    }

    fn settings(&self) -> &'a CompoundSettings {
        self.table.compound()
    }

    /// Split `word` into valid compound parts, or `None` when it is not a
    /// compound.
    pub fn find(&self, word: &str) -> Option<Vec<CompoundPart<'a>>> {
        let mut search = Search::default();
        let found = self.search(&mut search, word);
        if let Some(meter) = self.meter {
            meter.set(meter.get() + search.lookups);
        }
        found
    }

    fn search(&self, search: &mut Search<'a>, word: &str) -> Option<Vec<CompoundPart<'a>>> {
        let settings = self.settings();
        if settings.has_flags() {
            let mut parts = Vec::new();
            if self.segment_by_flags(search, word, 0, &mut parts) {
                return Some(parts);
            }
        }
        if !settings.rules.is_empty() {
            let start: Vec<Vec<usize>> = settings.rules.iter().map(|rule| rule.start()).collect();
            let mut parts = Vec::new();
            if self.segment_by_rules(search, word, 0, &mut parts, &start) {
                return Some(parts);
            }
        }
        None
    }

    /// Byte offsets of the possible ends of a part starting at `from`,
    /// shortest first, honouring the minimum part length.
    fn part_ends(&self, word: &str, from: usize) -> Vec<usize> {
        let min = self.settings().min_length;
        word[from..]
            .char_indices()
            .skip(1)
            .map(|(i, _)| from + i)
            .chain(std::iter::once(word.len()))
            .enumerate()
            .filter(|&(count, end)| count + 1 >= min && end > from)
            .map(|(_, end)| end)
            .collect()
    }

    fn remaining_fits(&self, word: &str, end: usize) -> bool {
        end == word.len() || word[end..].chars().count() >= self.settings().min_length
    }

    fn segment_by_flags(
        &self,
        search: &mut Search<'a>,
        word: &str,
        from: usize,
        parts: &mut Vec<CompoundPart<'a>>,
    ) -> bool {
        if parts.len() >= MAX_COMPOUND_PARTS || search.dead_ends.contains(&(from, parts.len())) {
            return false;
        }
        for end in self.part_ends(word, from) {
            let is_last = end == word.len();
            if is_last && parts.is_empty() {
                continue;
            }
            if !self.remaining_fits(word, end) {
                continue;
            }
            if !is_last && parts.len() + 1 >= MAX_COMPOUND_PARTS {
                continue;
            }
            let position = if parts.is_empty() {
                Position::First
            } else if is_last {
                Position::Last
            } else {
                Position::Middle
            };
            let Some(part) = self.cached_part(search, word, from, end, position) else {
                continue;
            };
            parts.push(part);
            if is_last || self.segment_by_flags(search, word, end, parts) {
                return true;
            }
            parts.pop();
        }
        search.dead_ends.insert((from, parts.len()));
        false
    }

    fn cached_part(
        &self,
        search: &mut Search<'a>,
        word: &str,
        from: usize,
        end: usize,
        position: Position,
    ) -> Option<CompoundPart<'a>> {
        if let Some(known) = search.parts.get(&(from, end, position)) {
            return known.clone();
        }
        if !search.spend() {
            return None;
        }
        let part = self.flagged_part(&word[from..end], position);
        search.parts.insert((from, end, position), part.clone());
        part
    }

    fn position_flag(&self, position: Position) -> Option<Flag> {
        let settings = self.settings();
        match position {
            Position::First => settings.begin,
            Position::Middle => settings.middle,
            Position::Last => settings.end,
        }
    }

    /// A reduction usable as a compound part at `position`: the first part
    /// may carry prefixes, the last part suffixes, middle parts neither.
    fn flagged_part(&self, text: &str, position: Position) -> Option<CompoundPart<'a>> {
        let settings = self.settings();
        let special = self.table.special_flags();
        if self.lookup.is_hidden(text) {
            return None;
        }
        reduce(self.table, self.lookup, text)
            .into_iter()
            .filter(|r| !r.entry.has_flag(special.forbidden_word))
            .filter(|r| {
                r.chain.iter().all(|step| match position {
                    Position::First => step.kind == AffixKind::Prefix,
                    Position::Last => step.kind == AffixKind::Suffix,
                    Position::Middle => false,
                })
            })
            .find(|r| {
                r.entry.has_flag(settings.flag) || r.entry.has_flag(self.position_flag(position))
            })
            .map(|Reduction { entry, chain }| CompoundPart {
                text: text.to_string(),
                entry,
                chain,
            })
    }

    /// `states` holds, per COMPOUNDRULE, the pattern positions reachable
    /// after the parts so far.
    fn segment_by_rules(
        &self,
        search: &mut Search<'a>,
        word: &str,
        from: usize,
        parts: &mut Vec<CompoundPart<'a>>,
        states: &[Vec<usize>],
    ) -> bool {
        let rules = &self.settings().rules;
        if from == word.len() {
            return parts.len() >= 2
                && rules
                    .iter()
                    .zip(states)
                    .any(|(rule, state)| rule.accepts(state));
        }
        if parts.len() >= MAX_COMPOUND_PARTS {
            return false;
        }
        let key = (from, parts.len(), states.to_vec());
        if search.rule_dead_ends.contains(&key) {
            return false;
        }
        let special = self.table.special_flags();
        for end in self.part_ends(word, from) {
            if !search.spend() {
                break;
            }
            let text = &word[from..end];
            if self.lookup.is_hidden(text) {
                continue;
            }
            let Some(entry) = self.lookup.lookup(text) else {
                continue;
            };
            if entry.has_flag(special.forbidden_word) {
                continue;
            }
            let next: Vec<Vec<usize>> = rules
                .iter()
                .zip(states)
                .map(|(rule, state)| rule.advance(state, &entry.flags))
                .collect();
            if next.iter().all(Vec::is_empty) {
                continue;
            }
            parts.push(CompoundPart {
                text: text.to_string(),
                entry,
                chain: Vec::new(),
            });
            if self.segment_by_rules(search, word, end, parts, &next) {
                return true;
            }
            parts.pop();
        }
        search.rule_dead_ends.insert(key);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunspell_dict::DictionaryStore;

    const FLAG_AFF: &str = "\
COMPOUNDFLAG C
ONLYINCOMPOUND O
FORBIDDENWORD !
SFX S Y 1
SFX S 0 s .
";

    fn load(aff: &str, dic: &str) -> (AffixTable, DictionaryStore) {
        let table = AffixTable::parse(aff).unwrap();
        let store = DictionaryStore::parse(dic, &table).unwrap();
        (table, store)
    }

    fn texts(parts: &[CompoundPart<'_>]) -> Vec<String> {
        parts.iter().map(|p| p.text.clone()).collect()
    }

    #[test]
    fn two_flagged_words() {
        let (table, store) = load(FLAG_AFF, "3\nfoot/CS\nball/CS\nhello\n");
        let checker = CompoundChecker::new(&table, &store);
        let parts = checker.find("football").unwrap();
        assert_eq!(texts(&parts), vec!["foot", "ball"]);
        assert!(checker.find("foothello").is_none());
        assert!(checker.find("foot").is_none());
    }

    #[test]
    fn last_part_may_take_a_suffix() {
        let (table, store) = load(FLAG_AFF, "2\nfoot/CS\nball/CS\n");
        let checker = CompoundChecker::new(&table, &store);
        let parts = checker.find("footballs").unwrap();
        assert_eq!(parts[1].text, "balls");
        assert_eq!(parts[1].chain.len(), 1);
        assert!(checker.find("footsball").is_none());
    }

    #[test]
    fn three_parts_and_only_in_compound() {
        let (table, store) = load(FLAG_AFF, "3\nfoot/C\nball/C\nsport/CO\n");
        let checker = CompoundChecker::new(&table, &store);
        let parts = checker.find("footballsport").unwrap();
        assert_eq!(texts(&parts), vec!["foot", "ball", "sport"]);
    }

    #[test]
    fn minimum_part_length() {
        let (table, store) = load(FLAG_AFF, "2\nab/C\nfoot/C\n");
        let checker = CompoundChecker::new(&table, &store);
        assert!(checker.find("abfoot").is_none());

        let aff = format!("{FLAG_AFF}COMPOUNDMIN 2\n");
        let (table, store) = load(&aff, "2\nab/C\nfoot/C\n");
        let checker = CompoundChecker::new(&table, &store);
        assert!(checker.find("abfoot").is_some());
    }

    #[test]
    fn forbidden_parts_are_rejected() {
        let (table, store) = load(FLAG_AFF, "2\nfoot/C\nball/C!\n");
        let checker = CompoundChecker::new(&table, &store);
        assert!(checker.find("football").is_none());
    }

    #[test]
    fn positional_flags() {
        let aff = "COMPOUNDBEGIN B\nCOMPOUNDEND E\n";
        let (table, store) = load(aff, "2\nfoot/B\nball/E\n");
        let checker = CompoundChecker::new(&table, &store);
        assert!(checker.find("football").is_some());
        assert!(checker.find("ballfoot").is_none());
    }

    #[test]
    fn compound_rules() {
        let aff = "COMPOUNDMIN 1\nONLYINCOMPOUND c\nCOMPOUNDRULE 2\nCOMPOUNDRULE n*1t\nCOMPOUNDRULE n*mp\n";
        let dic = "6\n0/nm\n1/n1\n2/nm\n4/nm\nst/tc\nth/pc\n";
        let (table, store) = load(aff, dic);
        let checker = CompoundChecker::new(&table, &store);
        assert!(checker.find("1st").is_some());
        assert!(checker.find("21st").is_some());
        assert!(checker.find("24th").is_some());
        assert!(checker.find("2st").is_none());
        assert!(checker.find("st").is_none());
    }

    #[test]
    fn unsplittable_word_stays_within_the_lookup_budget() {
        let aff = "COMPOUNDFLAG C\nCOMPOUNDMIN 1\n";
        let (table, store) = load(aff, "5\na/C\naa/C\naaa/C\naaaa/C\naaaaa/C\n");
        let meter = Cell::new(0);
        let checker = CompoundChecker::new(&table, &store).with_meter(Some(&meter));

        assert!(checker.find(&format!("{}b", "a".repeat(99))).is_none());
        assert!(meter.get() <= MAX_COMPOUND_LOOKUPS);

        meter.set(0);
        assert!(checker.find(&format!("{}b", "a".repeat(14))).is_none());
        assert!(meter.get() < 200, "{} lookups", meter.get());

        let parts = checker.find(&"a".repeat(30)).unwrap();
        assert_eq!(parts.iter().map(|p| p.text.len()).sum::<usize>(), 30);
    }

    #[test]
    fn unmatched_rule_prefix_stops_the_search() {
        let aff = "COMPOUNDMIN 1\nCOMPOUNDRULE 1\nCOMPOUNDRULE n*t\n";
        let (table, store) = load(aff, "3\n1/n\n11/n\nst/t\n");
        let meter = Cell::new(0);
        let checker = CompoundChecker::new(&table, &store).with_meter(Some(&meter));
        assert!(checker.find("1111st").is_some());
        assert!(checker.find(&format!("{}x", "1".repeat(80))).is_none());
        assert!(meter.get() <= 2 * MAX_COMPOUND_LOOKUPS);
    }
}
