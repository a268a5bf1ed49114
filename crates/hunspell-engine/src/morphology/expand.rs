// Lazy enumeration of the surface forms of one dictionary entry

use std::collections::VecDeque;

use hunspell_dict::{AffixTable, DictionaryEntry, RuleRef};

use super::chain::AffixChain;

/// One generated surface form and the rules that produced it, innermost
/// rule first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    pub form: String,
    pub chain: Vec<RuleRef>,
}

/// Breadth-first iterator over every legal form of an entry.
///
/// The bare word comes first (unless the entry needs an affix), followed
/// by one-rule forms in flag and declaration order, then longer chains.
/// The sequence is finite because chains are bounded, and can be
/// restarted or cloned mid-way.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    table: &'a AffixTable,
    entry: &'a DictionaryEntry,
    queue: VecDeque<AffixChain<'a>>,
}

impl<'a> Expansion<'a> {
    pub fn new(table: &'a AffixTable, entry: &'a DictionaryEntry) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(AffixChain::start(table, entry));
        Self {
            table,
            entry,
            queue,
        }
    }

    /// Go back to the first form.
    pub fn restart(&mut self) {
        *self = Self::new(self.table, self.entry);
    }

    pub fn entry(&self) -> &'a DictionaryEntry {
        self.entry
    }
}

impl Iterator for Expansion<'_> {
    type Item = Expanded;

    fn next(&mut self) -> Option<Expanded> {
        while let Some(chain) = self.queue.pop_front() {
            self.queue.extend(chain.extend());
            if chain.is_terminal() {
                let (form, chain) = chain.into_parts();
                return Some(Expanded { form, chain });
            }
        }
        None
    }
}

/// Expand `entry` into all of its surface forms.
pub fn expand<'a>(table: &'a AffixTable, entry: &'a DictionaryEntry) -> Expansion<'a> {
    Expansion::new(table, entry)
}
