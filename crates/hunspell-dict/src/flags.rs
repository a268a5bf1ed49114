// Flag encodings and flag sets

use std::fmt;

/// A flag identifier, normalized to a number whatever the file's flag mode.
///
/// - single-character and UTF-8 modes store the code point,
/// - long mode packs two code points as `first << 16 | second`,
/// - numeric mode stores the decimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(pub u32);

/// How flags are written in the affix and dictionary files (`FLAG` directive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlagMode {
    /// One character per flag (the default).
    #[default]
    Char,
    /// Two characters per flag (`FLAG long`).
    Long,
    /// Comma-separated decimal numbers (`FLAG num`).
    Numeric,
    /// One Unicode character per flag (`FLAG UTF-8`).
    Utf8,
}

impl FlagMode {
    /// Parse the value of a `FLAG` directive.
    pub fn from_directive(value: &str) -> Option<Self> {
        match value {
            "long" => Some(FlagMode::Long),
            "num" => Some(FlagMode::Numeric),
            v if v.eq_ignore_ascii_case("UTF-8") => Some(FlagMode::Utf8),
            _ => None,
        }
    }

    /// Parse a run of flags such as the part after `/` in a dictionary line.
    pub fn parse_flags(self, text: &str) -> Result<Vec<Flag>, String> {
        match self {
            FlagMode::Char | FlagMode::Utf8 => Ok(text.chars().map(|c| Flag(u32::from(c))).collect()),
            FlagMode::Long => {
                let chars: Vec<char> = text.chars().collect();
                if chars.len() % 2 != 0 {
                    return Err("long flags need an even number of characters".to_string());
                }
                chars
                    .chunks(2)
                    .map(|pair| {
                        let (hi, lo) = (u32::from(pair[0]), u32::from(pair[1]));
                        if hi > 0xFFFF || lo > 0xFFFF {
                            return Err(format!("character out of range in long flag {text:?}"));
                        }
                        Ok(Flag((hi << 16) | lo))
                    })
                    .collect()
            }
            FlagMode::Numeric => {
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                text.split(',')
                    .map(|piece| {
                        piece
                            .trim()
                            .parse::<u16>()
                            .map(|n| Flag(u32::from(n)))
                            .map_err(|_| format!("{piece:?} is not a number between 0 and 65535"))
                    })
                    .collect()
            }
        }
    }

    /// Parse exactly one flag, as in `NEEDAFFIX X`.
    pub fn parse_flag(self, text: &str) -> Result<Flag, String> {
        let flags = self.parse_flags(text)?;
        match flags.as_slice() {
            [flag] => Ok(*flag),
            [] => Err("missing flag".to_string()),
            _ => Err(format!("expected a single flag, found {}", flags.len())),
        }
    }

    /// Render a flag the way it is written in the files.
    pub fn format(self, flag: Flag) -> String {
        let code = |value: u32| char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER);
        match self {
            FlagMode::Char | FlagMode::Utf8 => code(flag.0).to_string(),
            FlagMode::Long => [code(flag.0 >> 16), code(flag.0 & 0xFFFF)].iter().collect(),
            FlagMode::Numeric => flag.0.to_string(),
        }
    }
}

/// Sorted, duplicate-free set of flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(Vec<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    pub fn insert(&mut self, flag: Flag) {
        if let Err(pos) = self.0.binary_search(&flag) {
            self.0.insert(pos, flag);
        }
    }

    /// Add every flag of `other`.
    pub fn merge(&mut self, other: &FlagSet) {
        for &flag in &other.0 {
            self.insert(flag);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags: Vec<Flag> = iter.into_iter().collect();
        flags.sort_unstable();
        flags.dedup();
        FlagSet(flags)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(c: char) -> Flag {
        Flag(u32::from(c))
    }

    #[test]
    fn directive_values() {
        assert_eq!(FlagMode::from_directive("long"), Some(FlagMode::Long));
        assert_eq!(FlagMode::from_directive("num"), Some(FlagMode::Numeric));
        assert_eq!(FlagMode::from_directive("UTF-8"), Some(FlagMode::Utf8));
        assert_eq!(FlagMode::from_directive("utf-8"), Some(FlagMode::Utf8));
        assert_eq!(FlagMode::from_directive("short"), None);
    }

    #[test]
    fn char_flags() {
        let flags = FlagMode::Char.parse_flags("ABc").unwrap();
        assert_eq!(flags, vec![flag('A'), flag('B'), flag('c')]);
    }

    #[test]
    fn long_flags_pair_characters() {
        let flags = FlagMode::Long.parse_flags("AaBb").unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(FlagMode::Long.format(flags[0]), "Aa");
        assert_eq!(FlagMode::Long.format(flags[1]), "Bb");
    }

    #[test]
    fn long_flags_reject_odd_length() {
        assert!(FlagMode::Long.parse_flags("AaB").is_err());
    }

    #[test]
    fn numeric_flags() {
        let flags = FlagMode::Numeric.parse_flags("1,23,456").unwrap();
        assert_eq!(flags, vec![Flag(1), Flag(23), Flag(456)]);
        assert_eq!(FlagMode::Numeric.format(Flag(23)), "23");
        assert!(FlagMode::Numeric.parse_flags("1,x").is_err());
        assert!(FlagMode::Numeric.parse_flags("70000").is_err());
    }

    #[test]
    fn utf8_flags() {
        let flags = FlagMode::Utf8.parse_flags("\u{00C4}\u{2022}").unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(FlagMode::Utf8.format(flags[1]), "\u{2022}");
    }

    #[test]
    fn single_flag() {
        assert_eq!(FlagMode::Char.parse_flag("X"), Ok(flag('X')));
        assert!(FlagMode::Char.parse_flag("XY").is_err());
        assert!(FlagMode::Char.parse_flag("").is_err());
    }

    #[test]
    fn flag_set_is_sorted_and_unique() {
        let set: FlagSet = [flag('b'), flag('a'), flag('b')].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(flag('a')));
        assert!(!set.contains(flag('c')));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![flag('a'), flag('b')]);
    }

    #[test]
    fn flag_set_merge() {
        let mut a: FlagSet = [flag('a')].into_iter().collect();
        let b: FlagSet = [flag('c'), flag('a')].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(flag('c')));
    }
}
