// Affix condition patterns

/// One position of a condition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Atom {
    Any,
    Char(char),
    Set { chars: Vec<char>, negated: bool },
}

impl Atom {
    fn matches(&self, c: char) -> bool {
        match self {
            Atom::Any => true,
            Atom::Char(expected) => *expected == c,
            Atom::Set { chars, negated } => chars.contains(&c) != *negated,
        }
    }
}

/// A condition a word must satisfy at the attach point of an affix: its
/// end for suffixes, its start for prefixes.
///
/// A condition is a sequence of atoms, each a literal character, `.`
/// (any character), a set `[abc]` or a negated set `[^abc]`. The lone
/// pattern `.` matches every word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    atoms: Vec<Atom>,
}

impl Condition {
    pub fn parse(pattern: &str) -> Result<Self, String> {
        if pattern == "." {
            return Ok(Self::default());
        }
        let mut atoms = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => atoms.push(Atom::Any),
                '[' => {
                    let mut set = Vec::new();
                    let mut negated = false;
                    let mut closed = false;
                    let mut first = true;
                    for inner in chars.by_ref() {
                        match inner {
                            ']' => {
                                closed = true;
                                break;
                            }
                            '^' if first => negated = true,
                            other => set.push(other),
                        }
                        first = false;
                    }
                    if !closed {
                        return Err("unterminated bracket".to_string());
                    }
                    if set.is_empty() {
                        return Err("empty character set".to_string());
                    }
                    atoms.push(Atom::Set {
                        chars: set,
                        negated,
                    });
                }
                ']' => return Err("unbalanced closing bracket".to_string()),
                other => atoms.push(Atom::Char(other)),
            }
        }
        Ok(Self { atoms })
    }

    /// Whether the condition is satisfied by every word.
    pub fn is_unconditional(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Check the condition against the end of `word` (suffix attach point).
    pub fn matches_end(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        self.atoms
            .iter()
            .rev()
            .all(|atom| chars.next().is_some_and(|c| atom.matches(c)))
    }

    /// Check the condition against the start of `word` (prefix attach point).
    pub fn matches_start(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.atoms
            .iter()
            .all(|atom| chars.next().is_some_and(|c| atom.matches(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(p: &str) -> Condition {
        Condition::parse(p).unwrap()
    }

    #[test]
    fn dot_matches_everything() {
        let c = cond(".");
        assert!(c.is_unconditional());
        assert!(c.matches_end(""));
        assert!(c.matches_start("word"));
    }

    #[test]
    fn literal_suffix_condition() {
        let c = cond("n");
        assert!(c.matches_end("run"));
        assert!(!c.matches_end("walk"));
    }

    #[test]
    fn sets_and_negated_sets() {
        let c = cond("[^aeiou]y");
        assert!(c.matches_end("try"));
        assert!(!c.matches_end("play"));
        assert!(!c.matches_end("y"));

        let c = cond("[sxzh]");
        assert!(c.matches_end("box"));
        assert!(!c.matches_end("cat"));
    }

    #[test]
    fn prefix_conditions_check_the_start() {
        let c = cond("[^a]");
        assert!(c.matches_start("do"));
        assert!(!c.matches_start("able"));
    }

    #[test]
    fn any_atom_requires_a_character() {
        let c = cond("a.");
        assert!(c.matches_end("ab"));
        assert!(!c.matches_end("a"));
    }

    #[test]
    fn malformed_patterns() {
        assert!(Condition::parse("[abc").is_err());
        assert!(Condition::parse("[]").is_err());
        assert!(Condition::parse("a]").is_err());
    }
}
