// Affix chains: which rules may follow which, applied step by step

use hunspell_dict::{AffixKind, AffixTable, DictionaryEntry, FlagSet, RuleRef};

/// Maximum number of suffixes in one chain.
pub const MAX_SUFFIXES: usize = 2;

/// Maximum number of prefixes in one chain.
pub const MAX_PREFIXES: usize = 1;

/// A dictionary entry with zero or more affix rules applied to it.
///
/// The first rule must be named by the entry's flags. A later rule is
/// legal when an earlier rule granted its flag through continuation
/// flags; its condition is then checked against the current form. A
/// prefix may also join a suffixed form through cross product, when both
/// groups allow it and the entry carries the prefix flag; its condition
/// is then checked against the base word.
#[derive(Debug, Clone)]
pub struct AffixChain<'a> {
    table: &'a AffixTable,
    entry: &'a DictionaryEntry,
    form: String,
    rules: Vec<RuleRef>,
    granted: FlagSet,
    prefixes: usize,
    suffixes: usize,
}

impl<'a> AffixChain<'a> {
    /// The bare entry.
    pub fn start(table: &'a AffixTable, entry: &'a DictionaryEntry) -> Self {
        Self {
            table,
            entry,
            form: entry.word.clone(),
            rules: Vec::new(),
            granted: FlagSet::new(),
            prefixes: 0,
            suffixes: 0,
        }
    }

    /// Replay `rules` on `entry`; `None` when any step is illegal.
    pub fn replay(
        table: &'a AffixTable,
        entry: &'a DictionaryEntry,
        rules: &[RuleRef],
    ) -> Option<Self> {
        rules
            .iter()
            .try_fold(Self::start(table, entry), |chain, &rule| chain.push(rule))
    }

    pub fn entry(&self) -> &'a DictionaryEntry {
        self.entry
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    pub fn into_parts(self) -> (String, Vec<RuleRef>) {
        (self.form, self.rules)
    }

    /// Whether the cross product path lets a prefix join this chain.
    fn cross_product_allows(&self, prefix: RuleRef) -> bool {
        let rule = self.table.rule(prefix);
        if rule.kind != AffixKind::Prefix || !rule.cross_product || self.prefixes > 0 {
            return false;
        }
        if !self.entry.flags.contains(rule.flag) {
            return false;
        }
        self.rules.first().is_some_and(|&first| {
            let first = self.table.rule(first);
            first.kind == AffixKind::Suffix && first.cross_product
        })
    }

    /// Apply one more rule, or `None` when the rule may not follow.
    pub fn push(&self, rule_ref: RuleRef) -> Option<Self> {
        let rule = self.table.rule(rule_ref);
        let (prefixes, suffixes) = match rule.kind {
            AffixKind::Prefix => (self.prefixes + 1, self.suffixes),
            AffixKind::Suffix => (self.prefixes, self.suffixes + 1),
        };
        if prefixes > MAX_PREFIXES || suffixes > MAX_SUFFIXES {
            return None;
        }

        let form = if self.rules.is_empty() {
            if !self.entry.flags.contains(rule.flag) {
                return None;
            }
            rule.apply(&self.form)?
        } else if self.granted.contains(rule.flag) {
            rule.apply(&self.form)?
        } else if self.cross_product_allows(rule_ref) {
            rule.apply_to(&self.form, &self.entry.word)?
        } else {
            return None;
        };

        let mut granted = self.granted.clone();
        granted.merge(&rule.continuation);
        let mut rules = self.rules.clone();
        rules.push(rule_ref);
        Some(Self {
            table: self.table,
            entry: self.entry,
            form,
            rules,
            granted,
            prefixes,
            suffixes,
        })
    }

    /// Rules that might follow, before conditions are checked.
    pub fn candidates(&self) -> Vec<RuleRef> {
        let mut flags = self.granted.clone();
        if self.rules.is_empty() || self.prefixes < MAX_PREFIXES {
            flags.merge(&self.entry.flags);
        }
        flags
            .iter()
            .flat_map(|flag| self.table.rules_for_flag(flag))
            .collect()
    }

    /// Every legal one-rule extension of this chain.
    pub fn extend(&self) -> Vec<AffixChain<'a>> {
        self.candidates()
            .into_iter()
            .filter_map(|rule| self.push(rule))
            .collect()
    }

    /// Whether the form stands as a word by itself.
    ///
    /// A bare entry with the NEEDAFFIX flag is not a word, and neither is
    /// a form whose last rule passes NEEDAFFIX on as a continuation flag.
    pub fn is_terminal(&self) -> bool {
        let need_affix = self.table.special_flags().need_affix;
        match self.rules.last() {
            None => !self.entry.has_flag(need_affix),
            Some(&last) => {
                !need_affix.is_some_and(|flag| self.table.rule(last).continuation.contains(flag))
            }
        }
    }
}
