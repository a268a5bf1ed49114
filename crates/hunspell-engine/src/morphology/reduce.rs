// Reduction of a surface form to dictionary entries and affix chains

use hashbrown::HashSet;
use hunspell_dict::{AffixKind, AffixTable, DictionaryEntry, RuleRef};

use super::chain::{AffixChain, MAX_PREFIXES, MAX_SUFFIXES};
use crate::lookup::WordLookup;

/// A dictionary entry and the chain of rules (innermost first) that
/// turns it into the reduced surface form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction<'a> {
    pub entry: &'a DictionaryEntry,
    pub chain: Vec<RuleRef>,
}

impl Reduction<'_> {
    pub fn is_bare(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Find every (entry, chain) pair that produces `surface`.
///
/// Affixes are peeled off from the outside in: for each split of the form
/// into a kept part and an affix string, the rules adding that string are
/// undone and the residue is looked up and peeled further. Each candidate
/// is confirmed by applying its chain forward from the entry, so only
/// chains the entry's flags permit are reported, each (base, chain) pair
/// once.
pub fn reduce<'a>(
    table: &AffixTable,
    lookup: &'a dyn WordLookup,
    surface: &str,
) -> Vec<Reduction<'a>> {
    let mut reducer = Reducer {
        table,
        lookup,
        surface,
        seen: HashSet::new(),
        found: Vec::new(),
    };
    reducer.visit(surface, &mut Vec::new());
    reducer.found
}

struct Reducer<'a, 't> {
    table: &'t AffixTable,
    lookup: &'a dyn WordLookup,
    surface: &'t str,
    seen: HashSet<(String, Vec<RuleRef>)>,
    found: Vec<Reduction<'a>>,
}

impl<'a> Reducer<'a, '_> {
    /// `peeled` holds the undone rules, outermost first.
    fn visit(&mut self, form: &str, peeled: &mut Vec<RuleRef>) {
        if let Some(entry) = self.lookup.lookup(form) {
            self.confirm(entry, peeled);
        }
        if peeled.len() >= MAX_PREFIXES + MAX_SUFFIXES {
            return;
        }
        for kind in [AffixKind::Suffix, AffixKind::Prefix] {
            for add in affix_strings(form, kind) {
                for &index in self.table.rules_adding(kind, add) {
                    let inner = RuleRef { kind, index };
                    if !self.may_precede(inner, peeled) {
                        continue;
                    }
                    let Some(residue) = self.table.rule(inner).unapply(form) else {
                        continue;
                    };
                    peeled.push(inner);
                    self.visit(&residue, peeled);
                    peeled.pop();
                }
            }
        }
    }

    /// Cheap pruning before the forward check: chain length limits, and
    /// the rule peeled last must be able to follow another rule at all.
    fn may_precede(&self, inner: RuleRef, peeled: &[RuleRef]) -> bool {
        let count = |kind: AffixKind| {
            peeled.iter().filter(|r| r.kind == kind).count() + usize::from(inner.kind == kind)
        };
        if count(AffixKind::Prefix) > MAX_PREFIXES || count(AffixKind::Suffix) > MAX_SUFFIXES {
            return false;
        }
        let Some(&outer) = peeled.last() else {
            return true;
        };
        let outer = self.table.rule(outer);
        self.table.continuation_flags().contains(outer.flag)
            || (outer.kind == AffixKind::Prefix && outer.cross_product)
    }

    fn confirm(&mut self, entry: &'a DictionaryEntry, peeled: &[RuleRef]) {
        let chain: Vec<RuleRef> = peeled.iter().rev().copied().collect();
        let Some(applied) = AffixChain::replay(self.table, entry, &chain) else {
            return;
        };
        if applied.form() != self.surface || !applied.is_terminal() {
            return;
        }
        if self.seen.insert((entry.word.clone(), chain.clone())) {
            self.found.push(Reduction { entry, chain });
        }
    }
}

/// Candidate affix strings at the attach point of `kind`, leaving at
/// least one character of `form`. The empty string is included.
fn affix_strings(form: &str, kind: AffixKind) -> Vec<&str> {
    let mut bounds: Vec<usize> = form.char_indices().map(|(i, _)| i).skip(1).collect();
    bounds.push(form.len());
    match kind {
        AffixKind::Suffix => bounds.iter().map(|&i| &form[i..]).collect(),
        AffixKind::Prefix => std::iter::once(0)
            .chain(bounds.iter().copied().filter(|&i| i < form.len()))
            .map(|i| &form[..i])
            .collect(),
    }
}
