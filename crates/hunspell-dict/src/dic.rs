// Dictionary word list
//
// The first line holds the number of entries. Each following line is
// `word[/flags] [morphological fields]`; `\/` escapes a slash inside the
// word. Morphological fields start after a tab, or after a space when the
// next token has the `xx:` shape.

use hashbrown::HashMap;
use hunspell_core::morph::{FIELD_STEM, MorphFields, is_field_token};
use log::warn;

use crate::ParseError;
use crate::aff::AffixTable;
use crate::flags::{Flag, FlagSet};

/// One dictionary word with its flags and morphological description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: String,
    pub flags: FlagSet,
    pub morph: MorphFields,
}

impl DictionaryEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    pub fn with_flags(word: impl Into<String>, flags: FlagSet) -> Self {
        Self {
            word: word.into(),
            flags,
            morph: MorphFields::new(),
        }
    }

    /// Whether the entry carries an optional special flag.
    pub fn has_flag(&self, flag: Option<Flag>) -> bool {
        flag.is_some_and(|f| self.flags.contains(f))
    }

    /// The stem reported for this entry: its `st:` annotation, else the word.
    pub fn stem(&self) -> &str {
        self.morph.get(FIELD_STEM).unwrap_or(self.word.as_str())
    }
}

/// Case-sensitive store of dictionary entries, immutable after loading.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    entries: Vec<DictionaryEntry>,
    index: HashMap<String, usize>,
}

impl DictionaryStore {
    /// Parse decoded word list text against an already parsed affix table.
    ///
    /// Any line with a flag the affix table does not declare fails the
    /// whole load. Repeated words merge their flags; the first line's
    /// morphological fields are kept.
    pub fn parse(text: &str, affixes: &AffixTable) -> Result<Self, ParseError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_start_matches('\u{FEFF}')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (count_line, count_text) = lines.next().ok_or(ParseError::MissingEntryCount)?;
        let count_value = count_text.split_whitespace().next().unwrap_or_default();
        let declared = count_value
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidEntryCount {
                line: count_line,
                value: count_value.to_string(),
            })?;

        let mut store = DictionaryStore {
            entries: Vec::with_capacity(declared),
            index: HashMap::with_capacity(declared),
        };
        let mut seen_lines = 0usize;

        for (line_no, line) in lines {
            if line.starts_with('\t') {
                continue;
            }
            seen_lines += 1;
            let (head, morph) = split_morph(line);
            let (word, flag_text) = split_flags(head);
            if word.is_empty() {
                continue;
            }

            let flags = match flag_text {
                Some(text) => {
                    affixes
                        .parse_flag_field(text)
                        .map_err(|reason| ParseError::InvalidFlag {
                            line: line_no,
                            flag: text.to_string(),
                            reason,
                        })?
                }
                None => FlagSet::new(),
            };
            if let Some(flag) = flags.iter().find(|&f| !affixes.is_declared(f)) {
                return Err(ParseError::UndeclaredFlag {
                    line: line_no,
                    word,
                    flag: affixes.format_flag(flag),
                });
            }

            store.insert(DictionaryEntry {
                word,
                flags,
                morph: MorphFields::parse(morph),
            });
        }

        if seen_lines != declared {
            warn!("dictionary declares {declared} entries, found {seen_lines}");
        }
        Ok(store)
    }

    fn insert(&mut self, entry: DictionaryEntry) {
        match self.index.get(&entry.word) {
            Some(&pos) => self.entries[pos].flags.merge(&entry.flags),
            None => {
                self.index.insert(entry.word.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.index.get(word).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Word characters ordered from most to least frequent; ties break on
    /// the character value.
    pub fn frequent_chars(&self) -> Vec<char> {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for entry in &self.entries {
            for c in entry.word.chars().filter(|c| c.is_alphabetic() || *c == '\'') {
                *counts.entry(c).or_default() += 1;
            }
        }
        let mut chars: Vec<(char, usize)> = counts.into_iter().collect();
        chars.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        chars.into_iter().map(|(c, _)| c).collect()
    }
}

/// Split a line into the `word/flags` part and the morphological fields.
fn split_morph(line: &str) -> (&str, &str) {
    if let Some((head, rest)) = line.split_once('\t') {
        return (head.trim_end(), rest.trim());
    }
    let mut from = 0;
    while let Some(pos) = line[from..].find(' ') {
        let at = from + pos;
        let rest = line[at..].trim_start();
        if rest.split_whitespace().next().is_some_and(is_field_token) {
            return (line[..at].trim_end(), rest);
        }
        from = at + 1;
    }
    (line.trim_end(), "")
}

/// Split `word/flags` at the first unescaped slash. A slash in the first
/// position belongs to the word.
fn split_flags(head: &str) -> (String, Option<&str>) {
    let slash = head
        .char_indices()
        .find(|&(i, c)| c == '/' && i > 0 && !head[..i].ends_with('\\'))
        .map(|(i, _)| i);
    match slash {
        Some(i) => (head[..i].replace("\\/", "/"), Some(&head[i + 1..])),
        None => (head.replace("\\/", "/"), None),
    }
}
