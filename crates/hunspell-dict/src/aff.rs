// Affix rules and affix file settings
//
// An affix file is line oriented: `DIRECTIVE arg...`. Lines starting with
// `#` are comments. PFX/SFX groups start with a header line giving the
// rule count; table directives (REP, MAP, BREAK, AF, COMPOUNDRULE) start
// with a count line followed by that many entries.

use hashbrown::{HashMap, HashSet};
use hunspell_core::encoding::TextEncoding;
use hunspell_core::morph::{MorphFields, is_field_token};
use log::{debug, warn};

use crate::ParseError;
use crate::compound::CompoundRule;
use crate::condition::Condition;
use crate::flags::{Flag, FlagMode, FlagSet};

/// Keyboard rows used for adjacency suggestions when the file has no `KEY`.
const DEFAULT_KEYBOARD: &str = "qwertyuiop|asdfghjkl|zxcvbnm";

/// Directives naming a flag the engine accepts on words but does not act on.
const UNSUPPORTED_FLAG_DIRECTIVES: &[&str] = &[
    "CIRCUMFIX",
    "WARN",
    "LEMMA_PRESENT",
    "SUBSTANDARD",
    "FORCEUCASE",
    "COMPOUNDPERMITFLAG",
    "COMPOUNDFORBIDFLAG",
    "COMPOUNDROOT",
];

/// Word break patterns used when the file has no `BREAK` table.
const DEFAULT_BREAKS: &[&str] = &["-", "^-", "-$"];

/// Minimum length of a compound part when `COMPOUNDMIN` is absent.
const DEFAULT_COMPOUND_MIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl AffixKind {
    pub fn keyword(self) -> &'static str {
        match self {
            AffixKind::Prefix => "PFX",
            AffixKind::Suffix => "SFX",
        }
    }
}

/// Reference to a rule inside an [`AffixTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleRef {
    pub kind: AffixKind,
    pub index: usize,
}

/// One `PFX`/`SFX` rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRule {
    pub kind: AffixKind,
    pub flag: Flag,
    /// Characters removed from the word at the attach point.
    pub strip: String,
    /// Characters added in their place.
    pub add: String,
    pub condition: Condition,
    /// Flags granted to the affixed form.
    pub continuation: FlagSet,
    /// Whether the rule's group may combine with an affix of the other kind.
    pub cross_product: bool,
    pub morph: MorphFields,
}

impl AffixRule {
    fn condition_holds(&self, subject: &str) -> bool {
        match self.kind {
            AffixKind::Suffix => self.condition.matches_end(subject),
            AffixKind::Prefix => self.condition.matches_start(subject),
        }
    }

    /// Apply the rule to `word`, checking the condition against `subject`.
    ///
    /// The condition subject differs from `word` when a prefix joins an
    /// already suffixed form through cross product: the prefix condition is
    /// then evaluated on the base word. Stripping must leave at least one
    /// character of `word`.
    pub fn apply_to(&self, word: &str, subject: &str) -> Option<String> {
        if !self.condition_holds(subject) {
            return None;
        }
        match self.kind {
            AffixKind::Suffix => {
                let kept = word.strip_suffix(self.strip.as_str())?;
                (!kept.is_empty()).then(|| format!("{kept}{}", self.add))
            }
            AffixKind::Prefix => {
                let kept = word.strip_prefix(self.strip.as_str())?;
                (!kept.is_empty()).then(|| format!("{}{kept}", self.add))
            }
        }
    }

    pub fn apply(&self, word: &str) -> Option<String> {
        self.apply_to(word, word)
    }

    /// Undo the rule on an affixed form: remove the added characters and
    /// restore the stripped ones. The condition is not checked.
    pub fn unapply(&self, form: &str) -> Option<String> {
        match self.kind {
            AffixKind::Suffix => {
                let kept = form.strip_suffix(self.add.as_str())?;
                (!kept.is_empty()).then(|| format!("{kept}{}", self.strip))
            }
            AffixKind::Prefix => {
                let kept = form.strip_prefix(self.add.as_str())?;
                (!kept.is_empty()).then(|| format!("{}{kept}", self.strip))
            }
        }
    }
}

/// A `REP` entry: a common misspelling and its correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
    /// `^` prefix: only matches at the start of the word.
    pub anchor_start: bool,
    /// `$` suffix: only matches at the end of the word.
    pub anchor_end: bool,
}

/// Compounding settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSettings {
    pub flag: Option<Flag>,
    pub begin: Option<Flag>,
    pub middle: Option<Flag>,
    pub end: Option<Flag>,
    pub min_length: usize,
    pub rules: Vec<CompoundRule>,
}

impl Default for CompoundSettings {
    fn default() -> Self {
        Self {
            flag: None,
            begin: None,
            middle: None,
            end: None,
            min_length: DEFAULT_COMPOUND_MIN,
            rules: Vec::new(),
        }
    }
}

impl CompoundSettings {
    /// Whether flag-based compounding (`COMPOUNDFLAG` family) is configured.
    pub fn has_flags(&self) -> bool {
        self.flag.is_some() || self.begin.is_some() || self.middle.is_some() || self.end.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.has_flags() || !self.rules.is_empty()
    }
}

/// Flags with a fixed meaning for dictionary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialFlags {
    pub need_affix: Option<Flag>,
    pub forbidden_word: Option<Flag>,
    pub keep_case: Option<Flag>,
    pub no_suggest: Option<Flag>,
    pub only_in_compound: Option<Flag>,
}

impl SpecialFlags {
    fn iter(&self) -> impl Iterator<Item = Flag> {
        [
            self.need_affix,
            self.forbidden_word,
            self.keep_case,
            self.no_suggest,
            self.only_in_compound,
        ]
        .into_iter()
        .flatten()
    }
}

/// Everything an affix file declares.
#[derive(Debug, Clone)]
pub struct AffixTable {
    flag_mode: FlagMode,
    encoding: TextEncoding,
    prefixes: Vec<AffixRule>,
    suffixes: Vec<AffixRule>,
    prefix_groups: HashMap<Flag, Vec<usize>>,
    suffix_groups: HashMap<Flag, Vec<usize>>,
    prefixes_by_add: HashMap<String, Vec<usize>>,
    suffixes_by_add: HashMap<String, Vec<usize>>,
    continuation_flags: FlagSet,
    aliases: Vec<FlagSet>,
    special: SpecialFlags,
    compound: CompoundSettings,
    try_chars: Vec<char>,
    keyboard: Vec<Vec<char>>,
    replacements: Vec<Replacement>,
    map_groups: Vec<Vec<String>>,
    break_patterns: Vec<String>,
    declared: HashSet<Flag>,
}

impl Default for AffixTable {
    fn default() -> Self {
        Self {
            flag_mode: FlagMode::default(),
            encoding: TextEncoding::default(),
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            prefix_groups: HashMap::new(),
            suffix_groups: HashMap::new(),
            prefixes_by_add: HashMap::new(),
            suffixes_by_add: HashMap::new(),
            continuation_flags: FlagSet::new(),
            aliases: Vec::new(),
            special: SpecialFlags::default(),
            compound: CompoundSettings::default(),
            try_chars: Vec::new(),
            keyboard: parse_keyboard(DEFAULT_KEYBOARD),
            replacements: Vec::new(),
            map_groups: Vec::new(),
            break_patterns: DEFAULT_BREAKS.iter().map(|s| s.to_string()).collect(),
            declared: HashSet::new(),
        }
    }
}

impl AffixTable {
    /// Parse decoded affix file text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        AffixParser::default().run(text)
    }

    /// Find the `SET` label in raw affix file bytes, before decoding.
    pub fn sniff_encoding_label(bytes: &[u8]) -> Option<String> {
        bytes.split(|&b| b == b'\n').find_map(|line| {
            let line = line.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(line);
            let rest = line.strip_prefix(b"SET")?;
            if !rest.first().is_some_and(|b| b.is_ascii_whitespace()) {
                return None;
            }
            let label = String::from_utf8_lossy(rest);
            let label = label.split_whitespace().next()?;
            Some(label.to_string())
        })
    }

    pub fn flag_mode(&self) -> FlagMode {
        self.flag_mode
    }

    pub fn encoding(&self) -> &TextEncoding {
        &self.encoding
    }

    pub fn rule(&self, r: RuleRef) -> &AffixRule {
        match r.kind {
            AffixKind::Prefix => &self.prefixes[r.index],
            AffixKind::Suffix => &self.suffixes[r.index],
        }
    }

    pub fn prefixes(&self) -> &[AffixRule] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[AffixRule] {
        &self.suffixes
    }

    /// Rules of the prefix and suffix groups named by `flag`, in declaration order.
    pub fn rules_for_flag(&self, flag: Flag) -> impl Iterator<Item = RuleRef> + '_ {
        let prefixes = self.prefix_groups.get(&flag).map(Vec::as_slice).unwrap_or(&[]);
        let suffixes = self.suffix_groups.get(&flag).map(Vec::as_slice).unwrap_or(&[]);
        prefixes
            .iter()
            .map(|&index| RuleRef {
                kind: AffixKind::Prefix,
                index,
            })
            .chain(suffixes.iter().map(|&index| RuleRef {
                kind: AffixKind::Suffix,
                index,
            }))
    }

    /// Rules whose add string is exactly `add`.
    pub fn rules_adding(&self, kind: AffixKind, add: &str) -> &[usize] {
        let index = match kind {
            AffixKind::Prefix => &self.prefixes_by_add,
            AffixKind::Suffix => &self.suffixes_by_add,
        };
        index.get(add).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of all rules' continuation flags.
    pub fn continuation_flags(&self) -> &FlagSet {
        &self.continuation_flags
    }

    pub fn special_flags(&self) -> &SpecialFlags {
        &self.special
    }

    pub fn compound(&self) -> &CompoundSettings {
        &self.compound
    }

    pub fn try_chars(&self) -> &[char] {
        &self.try_chars
    }

    pub fn keyboard_rows(&self) -> &[Vec<char>] {
        &self.keyboard
    }

    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    pub fn map_groups(&self) -> &[Vec<String>] {
        &self.map_groups
    }

    pub fn break_patterns(&self) -> &[String] {
        &self.break_patterns
    }

    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// Whether a flag has a meaning in this affix file.
    pub fn is_declared(&self, flag: Flag) -> bool {
        self.declared.contains(&flag)
    }

    pub fn format_flag(&self, flag: Flag) -> String {
        self.flag_mode.format(flag)
    }

    /// Parse a flag field from a rule or a dictionary line. With `AF`
    /// aliases, a number refers to the alias of that (1-based) index.
    pub fn parse_flag_field(&self, text: &str) -> Result<FlagSet, String> {
        if !self.aliases.is_empty() {
            if let Ok(index) = text.parse::<usize>() {
                return index
                    .checked_sub(1)
                    .and_then(|i| self.aliases.get(i))
                    .cloned()
                    .ok_or_else(|| format!("no flag alias number {index}"));
            }
        }
        self.flag_mode
            .parse_flags(text)
            .map(|flags| flags.into_iter().collect())
    }
}

fn parse_keyboard(value: &str) -> Vec<Vec<char>> {
    value
        .split('|')
        .filter(|row| !row.is_empty())
        .map(|row| row.chars().collect())
        .collect()
}

/// Split a MAP entry into its members; parentheses group several characters.
fn parse_map_group(value: &str) -> Result<Vec<String>, String> {
    let mut members = Vec::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '(' {
            let mut member = String::new();
            let mut closed = false;
            for inner in chars.by_ref() {
                if inner == ')' {
                    closed = true;
                    break;
                }
                member.push(inner);
            }
            if !closed || member.is_empty() {
                return Err("unterminated parenthesis".to_string());
            }
            members.push(member);
        } else {
            members.push(c.to_string());
        }
    }
    Ok(members)
}

fn parse_replacement(from: &str, to: &str) -> Replacement {
    let anchor_start = from.starts_with('^');
    let from = from.strip_prefix('^').unwrap_or(from);
    let anchor_end = from.len() > 1 && from.ends_with('$');
    let from = if anchor_end {
        &from[..from.len() - 1]
    } else {
        from
    };
    Replacement {
        from: from.replace('_', " "),
        to: to.replace('_', " "),
        anchor_start,
        anchor_end,
    }
}

/// Header of the PFX/SFX group whose rule lines are being read.
struct PendingGroup {
    kind: AffixKind,
    flag: Flag,
    cross_product: bool,
    remaining: usize,
}

#[derive(Default)]
struct AffixParser {
    table: AffixTable,
    pending: Option<PendingGroup>,
    /// Declared and seen entry counts per table directive.
    table_counts: HashMap<&'static str, (usize, usize)>,
    /// Flags of directives that are parsed but have no effect.
    unsupported_flags: Vec<Flag>,
}

impl AffixParser {
    fn run(mut self, text: &str) -> Result<AffixTable, ParseError> {
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_start_matches('\u{FEFF}').trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            self.line(line_no, &fields)?;
        }
        if let Some(pending) = self.pending.as_ref().filter(|p| p.remaining > 0) {
            return Err(ParseError::MalformedRule {
                line: text.lines().count(),
                reason: format!(
                    "{} group {} is missing {} rule(s)",
                    pending.kind.keyword(),
                    self.table.format_flag(pending.flag),
                    pending.remaining
                ),
            });
        }
        for (directive, (declared, seen)) in &self.table_counts {
            if declared != seen {
                warn!("{directive}: declared {declared} entries, found {seen}");
            }
        }
        Ok(self.finish())
    }

    fn finish(mut self) -> AffixTable {
        let table = &mut self.table;
        let mut declared: HashSet<Flag> = HashSet::new();
        declared.extend(table.prefix_groups.keys().copied());
        declared.extend(table.suffix_groups.keys().copied());
        declared.extend(table.special.iter());
        declared.extend(
            [
                table.compound.flag,
                table.compound.begin,
                table.compound.middle,
                table.compound.end,
            ]
            .into_iter()
            .flatten(),
        );
        for rule in &table.compound.rules {
            declared.extend(rule.flags());
        }
        declared.extend(self.unsupported_flags.iter().copied());
        table.declared = declared;
        self.table
    }

    fn line(&mut self, line_no: usize, fields: &[&str]) -> Result<(), ParseError> {
        let directive = fields[0];

        if let Some(pending) = self.pending.as_ref().filter(|p| p.remaining > 0) {
            if directive != pending.kind.keyword() {
                return Err(ParseError::MalformedRule {
                    line: line_no,
                    reason: format!(
                        "expected {} more {} rule(s), found {directive}",
                        pending.remaining,
                        pending.kind.keyword()
                    ),
                });
            }
            return self.rule_line(line_no, fields);
        }

        match directive {
            "PFX" => self.group_header(line_no, AffixKind::Prefix, fields),
            "SFX" => self.group_header(line_no, AffixKind::Suffix, fields),
            "SET" => {
                let label = self.argument(line_no, fields)?;
                self.table.encoding = TextEncoding::from_label(label)
                    .unwrap_or_else(|_| TextEncoding::Raw(label.to_string()));
                Ok(())
            }
            "FLAG" => {
                let value = self.argument(line_no, fields)?;
                self.table.flag_mode =
                    FlagMode::from_directive(value).ok_or_else(|| ParseError::InvalidFlagMode {
                        line: line_no,
                        value: value.to_string(),
                    })?;
                Ok(())
            }
            "TRY" => {
                self.table.try_chars = self.argument(line_no, fields)?.chars().collect();
                Ok(())
            }
            "KEY" => {
                self.table.keyboard = parse_keyboard(self.argument(line_no, fields)?);
                Ok(())
            }
            "NEEDAFFIX" | "PSEUDOROOT" => {
                self.table.special.need_affix = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "FORBIDDENWORD" => {
                self.table.special.forbidden_word = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "KEEPCASE" => {
                self.table.special.keep_case = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "NOSUGGEST" => {
                self.table.special.no_suggest = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "ONLYINCOMPOUND" => {
                self.table.special.only_in_compound = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "COMPOUNDFLAG" => {
                self.table.compound.flag = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "COMPOUNDBEGIN" => {
                self.table.compound.begin = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "COMPOUNDMIDDLE" => {
                self.table.compound.middle = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "COMPOUNDEND" | "COMPOUNDLAST" => {
                self.table.compound.end = Some(self.single_flag(line_no, fields)?);
                Ok(())
            }
            "COMPOUNDMIN" => {
                let value = self.argument(line_no, fields)?;
                let min = value.parse::<usize>().map_err(|_| ParseError::MalformedDirective {
                    line: line_no,
                    directive: directive.to_string(),
                    reason: format!("{value:?} is not a number"),
                })?;
                self.table.compound.min_length = min.max(1);
                Ok(())
            }
            "REP" | "MAP" | "BREAK" | "AF" | "COMPOUNDRULE" => self.table_line(line_no, fields),
            _ if UNSUPPORTED_FLAG_DIRECTIVES.contains(&directive) => {
                let flag = self.single_flag(line_no, fields)?;
                debug!("line {line_no}: {directive} is not supported, its flag is accepted and ignored");
                self.unsupported_flags.push(flag);
                Ok(())
            }
            _ => {
                debug!("line {line_no}: ignoring directive {directive}");
                Ok(())
            }
        }
    }

    fn argument<'f>(&self, line_no: usize, fields: &[&'f str]) -> Result<&'f str, ParseError> {
        fields
            .get(1)
            .copied()
            .ok_or_else(|| ParseError::MalformedDirective {
                line: line_no,
                directive: fields[0].to_string(),
                reason: "missing argument".to_string(),
            })
    }

    fn single_flag(&self, line_no: usize, fields: &[&str]) -> Result<Flag, ParseError> {
        let value = self.argument(line_no, fields)?;
        self.table
            .flag_mode
            .parse_flag(value)
            .map_err(|reason| ParseError::InvalidFlag {
                line: line_no,
                flag: value.to_string(),
                reason,
            })
    }

    fn group_header(
        &mut self,
        line_no: usize,
        kind: AffixKind,
        fields: &[&str],
    ) -> Result<(), ParseError> {
        if fields.len() < 4 {
            return Err(ParseError::MalformedRule {
                line: line_no,
                reason: format!("{} header needs a flag, Y/N and a rule count", kind.keyword()),
            });
        }
        let flag = self.single_flag(line_no, fields)?;
        let cross_product = match fields[2] {
            "Y" => true,
            "N" => false,
            other => {
                return Err(ParseError::MalformedRule {
                    line: line_no,
                    reason: format!("cross product must be Y or N, found {other:?}"),
                });
            }
        };
        let remaining = fields[3]
            .parse::<usize>()
            .map_err(|_| ParseError::MalformedRule {
                line: line_no,
                reason: format!("invalid rule count {:?}", fields[3]),
            })?;
        let groups = match kind {
            AffixKind::Prefix => &mut self.table.prefix_groups,
            AffixKind::Suffix => &mut self.table.suffix_groups,
        };
        groups.entry(flag).or_default();
        self.pending = Some(PendingGroup {
            kind,
            flag,
            cross_product,
            remaining,
        });
        Ok(())
    }

    fn rule_line(&mut self, line_no: usize, fields: &[&str]) -> Result<(), ParseError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(());
        };
        let (kind, group_flag, cross_product) = (pending.kind, pending.flag, pending.cross_product);
        pending.remaining -= 1;

        if fields.len() < 4 {
            return Err(ParseError::MalformedRule {
                line: line_no,
                reason: "rule needs a flag, a strip string and an add string".to_string(),
            });
        }
        let flag = self.single_flag(line_no, fields)?;
        if flag != group_flag {
            return Err(ParseError::MalformedRule {
                line: line_no,
                reason: format!(
                    "flag {} does not match the group header {}",
                    fields[1],
                    self.table.format_flag(group_flag)
                ),
            });
        }

        let strip = match fields[2] {
            "0" => String::new(),
            s => s.to_string(),
        };
        let (add, continuation) = match fields[3].split_once('/') {
            Some((add, flags)) => {
                let continuation =
                    self.table
                        .parse_flag_field(flags)
                        .map_err(|reason| ParseError::InvalidFlag {
                            line: line_no,
                            flag: flags.to_string(),
                            reason,
                        })?;
                (add, continuation)
            }
            None => (fields[3], FlagSet::new()),
        };
        let add = match add {
            "0" => String::new(),
            s => s.to_string(),
        };

        // The condition may be omitted before the morphological fields.
        let (pattern, morph_start) = match fields.get(4) {
            Some(f) if !is_field_token(f) => (*f, 5),
            _ => (".", 4),
        };
        let condition = Condition::parse(pattern).map_err(|reason| ParseError::InvalidCondition {
            line: line_no,
            condition: pattern.to_string(),
            reason,
        })?;
        let morph = MorphFields::parse(&fields[morph_start.min(fields.len())..].join(" "));

        let rule = AffixRule {
            kind,
            flag,
            strip,
            add,
            condition,
            continuation,
            cross_product,
            morph,
        };
        self.push_rule(rule);
        Ok(())
    }

    fn push_rule(&mut self, rule: AffixRule) {
        let table = &mut self.table;
        table.continuation_flags.merge(&rule.continuation);
        let (rules, groups, by_add) = match rule.kind {
            AffixKind::Prefix => (
                &mut table.prefixes,
                &mut table.prefix_groups,
                &mut table.prefixes_by_add,
            ),
            AffixKind::Suffix => (
                &mut table.suffixes,
                &mut table.suffix_groups,
                &mut table.suffixes_by_add,
            ),
        };
        let index = rules.len();
        groups.entry(rule.flag).or_default().push(index);
        by_add.entry(rule.add.clone()).or_default().push(index);
        rules.push(rule);
    }

    fn table_line(&mut self, line_no: usize, fields: &[&str]) -> Result<(), ParseError> {
        let directive: &'static str = match fields[0] {
            "REP" => "REP",
            "MAP" => "MAP",
            "BREAK" => "BREAK",
            "AF" => "AF",
            _ => "COMPOUNDRULE",
        };
        let malformed = |reason: String| ParseError::MalformedDirective {
            line: line_no,
            directive: directive.to_string(),
            reason,
        };

        if !self.table_counts.contains_key(directive) {
            let value = self.argument(line_no, fields)?;
            let count = value
                .parse::<usize>()
                .map_err(|_| malformed(format!("expected an entry count, found {value:?}")))?;
            self.table_counts.insert(directive, (count, 0));
            if directive == "BREAK" {
                self.table.break_patterns.clear();
            }
            return Ok(());
        }
        if let Some((_, seen)) = self.table_counts.get_mut(directive) {
            *seen += 1;
        }

        match directive {
            "REP" => {
                let (Some(from), Some(to)) = (fields.get(1), fields.get(2)) else {
                    return Err(malformed("expected a pattern and a replacement".to_string()));
                };
                self.table.replacements.push(parse_replacement(from, to));
            }
            "MAP" => {
                let value = self.argument(line_no, fields)?;
                let group = parse_map_group(value).map_err(malformed)?;
                self.table.map_groups.push(group);
            }
            "BREAK" => {
                let value = self.argument(line_no, fields)?;
                self.table.break_patterns.push(value.to_string());
            }
            "AF" => {
                let value = self.argument(line_no, fields)?;
                let flags = self
                    .table
                    .flag_mode
                    .parse_flags(value)
                    .map_err(|reason| ParseError::InvalidFlag {
                        line: line_no,
                        flag: value.to_string(),
                        reason,
                    })?;
                self.table.aliases.push(flags.into_iter().collect());
            }
            _ => {
                let value = self.argument(line_no, fields)?;
                let rule = CompoundRule::parse(value, self.table.flag_mode).map_err(malformed)?;
                self.table.compound.rules.push(rule);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sample affix file
SET UTF-8
TRY esianrtolcdugmphbyfvkwz
KEY qwertyuiop|asdfghjkl|zxcvbnm
NEEDAFFIX X
FORBIDDENWORD !

REP 2
REP alot a_lot
REP ^f ph

MAP 1
MAP e(ee)\u{00E9}

PFX U Y 1
PFX U 0 un .

SFX G Y 2
SFX G 0 ning n is:ing
SFX G 0 ing [^n]

SFX S Y 2
SFX S y ies [^aeiou]y
SFX S 0 s/X [^y]
";

    fn flag(c: char) -> Flag {
        Flag(u32::from(c))
    }

    #[test]
    fn parses_groups_in_declaration_order() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        assert_eq!(table.prefixes().len(), 1);
        assert_eq!(table.suffixes().len(), 4);
        let g: Vec<RuleRef> = table.rules_for_flag(flag('G')).collect();
        assert_eq!(g.len(), 2);
        assert_eq!(table.rule(g[0]).add, "ning");
        assert_eq!(table.rule(g[1]).add, "ing");
        assert!(table.rule(g[0]).cross_product);
    }

    #[test]
    fn rule_fields() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        let s = &table.suffixes()[2];
        assert_eq!(s.strip, "y");
        assert_eq!(s.add, "ies");
        assert_eq!(s.apply("try").as_deref(), Some("tries"));
        assert_eq!(s.apply("play"), None);

        let with_cont = &table.suffixes()[3];
        assert!(with_cont.continuation.contains(flag('X')));
        assert!(table.continuation_flags().contains(flag('X')));

        let morph = &table.suffixes()[0].morph;
        assert_eq!(morph.to_string(), "is:ing");
    }

    #[test]
    fn add_index() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        assert_eq!(table.rules_adding(AffixKind::Suffix, "ning"), &[0]);
        assert_eq!(table.rules_adding(AffixKind::Prefix, "un"), &[0]);
        assert!(table.rules_adding(AffixKind::Suffix, "ed").is_empty());
    }

    #[test]
    fn apply_and_unapply_are_inverse() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        let rule = &table.suffixes()[2];
        let form = rule.apply("try").unwrap();
        assert_eq!(rule.unapply(&form).as_deref(), Some("try"));
        let prefix = &table.prefixes()[0];
        assert_eq!(prefix.apply("do").as_deref(), Some("undo"));
        assert_eq!(prefix.unapply("undo").as_deref(), Some("do"));
        assert_eq!(prefix.unapply("un"), None);
    }

    #[test]
    fn stripping_must_leave_a_character() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        let rule = &table.suffixes()[2];
        assert_eq!(rule.apply("y"), None);
    }

    #[test]
    fn global_settings() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        assert_eq!(table.encoding(), &TextEncoding::Utf8);
        assert_eq!(table.try_chars()[0], 'e');
        assert_eq!(table.keyboard_rows().len(), 3);
        assert_eq!(table.special_flags().need_affix, Some(flag('X')));
        assert_eq!(table.special_flags().forbidden_word, Some(flag('!')));
        assert!(table.is_declared(flag('G')));
        assert!(table.is_declared(flag('!')));
        assert!(!table.is_declared(flag('Q')));
    }

    #[test]
    fn unsupported_flag_directives_declare_their_flags() {
        let table = AffixTable::parse("CIRCUMFIX Z\nWARN W\nLEMMA_PRESENT L\nCHECKSHARPS\n").unwrap();
        assert!(table.is_declared(flag('Z')));
        assert!(table.is_declared(flag('W')));
        assert!(table.is_declared(flag('L')));
        assert!(!table.is_declared(flag('Q')));
        assert!(AffixTable::parse("CIRCUMFIX\n").is_err());
    }

    #[test]
    fn replacement_table() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        let reps = table.replacements();
        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].to, "a lot");
        assert!(reps[1].anchor_start);
        assert_eq!(reps[1].from, "f");
    }

    #[test]
    fn map_groups_with_parentheses() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        assert_eq!(table.map_groups()[0], vec!["e", "ee", "\u{00E9}"]);
    }

    #[test]
    fn default_break_patterns() {
        let table = AffixTable::parse(SAMPLE).unwrap();
        assert_eq!(table.break_patterns(), &["-", "^-", "-$"]);

        let table = AffixTable::parse("BREAK 0\n").unwrap();
        assert!(table.break_patterns().is_empty());
    }

    #[test]
    fn long_flags_and_aliases() {
        let text = "FLAG long\nAF 2\nAF AaBb\nAF Cc\nSFX Aa Y 1\nSFX Aa 0 s/2 .\nSFX Cc Y 1\nSFX Cc 0 x .\n";
        let table = AffixTable::parse(text).unwrap();
        assert!(table.has_aliases());
        let cont = &table.suffixes()[0].continuation;
        let cc = FlagMode::Long.parse_flag("Cc").unwrap();
        assert!(cont.contains(cc));
        let set = table.parse_flag_field("1").unwrap();
        assert_eq!(set.len(), 2);
        assert!(table.parse_flag_field("9").is_err());
    }

    #[test]
    fn numeric_flags() {
        let text = "FLAG num\nSFX 101 N 1\nSFX 101 0 s .\n";
        let table = AffixTable::parse(text).unwrap();
        assert!(table.is_declared(Flag(101)));
        assert!(!table.suffixes()[0].cross_product);
    }

    #[test]
    fn compound_settings() {
        let text = "COMPOUNDFLAG C\nCOMPOUNDMIN 1\nONLYINCOMPOUND O\nCOMPOUNDRULE 1\nCOMPOUNDRULE n*1t\n";
        let table = AffixTable::parse(text).unwrap();
        let compound = table.compound();
        assert!(compound.is_enabled());
        assert_eq!(compound.flag, Some(flag('C')));
        assert_eq!(compound.min_length, 1);
        assert_eq!(compound.rules.len(), 1);
        assert!(table.is_declared(flag('n')));
    }

    #[test]
    fn sniffs_encoding_label_from_bytes() {
        assert_eq!(
            AffixTable::sniff_encoding_label(b"# c\nSET ISO8859-15\nTRY abc\n").as_deref(),
            Some("ISO8859-15")
        );
        assert_eq!(AffixTable::sniff_encoding_label(b"TRY abc\n"), None);
        assert_eq!(AffixTable::sniff_encoding_label(b"SETX foo\n"), None);
    }

    // -- error cases --

    #[test]
    fn invalid_flag_mode() {
        let err = AffixTable::parse("SET UTF-8\nFLAG weird\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFlagMode {
                line: 2,
                value: "weird".to_string()
            }
        );
    }

    #[test]
    fn invalid_condition() {
        let err = AffixTable::parse("SFX A Y 1\nSFX A 0 s [abc\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCondition { line: 2, .. }));
    }

    #[test]
    fn malformed_rule_line() {
        let err = AffixTable::parse("SFX A Y 1\nSFX A 0\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRule { line: 2, .. }));
    }

    #[test]
    fn missing_rules_in_group() {
        let err = AffixTable::parse("SFX A Y 2\nSFX A 0 s .\nTRY abc\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRule { line: 3, .. }));

        let err = AffixTable::parse("SFX A Y 2\nSFX A 0 s .\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRule { .. }));
    }

    #[test]
    fn rule_flag_must_match_header() {
        let err = AffixTable::parse("SFX A Y 1\nSFX B 0 s .\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRule { line: 2, .. }));
    }

    #[test]
    fn bad_cross_product_marker() {
        let err = AffixTable::parse("PFX A maybe 1\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRule { line: 1, .. }));
    }

    #[test]
    fn table_count_must_be_numeric() {
        let err = AffixTable::parse("REP x y\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDirective { line: 1, .. }));
    }

    #[test]
    fn count_mismatch_is_tolerated() {
        let table = AffixTable::parse("REP 3\nREP a b\n").unwrap();
        assert_eq!(table.replacements().len(), 1);
    }

    #[test]
    fn unknown_directives_are_ignored() {
        let table = AffixTable::parse("LANG en_US\nWORDCHARS 0123456789\n").unwrap();
        assert!(table.prefixes().is_empty());
    }
}
