// COMPOUNDRULE patterns

use crate::flags::{Flag, FlagMode, FlagSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    ZeroOrOne,
    ZeroOrMore,
}

/// A regular pattern over the flags of compound parts, e.g. `AB*C?`.
///
/// Each atom is a flag optionally followed by `*` or `?`. In long and
/// numeric flag modes atoms are written in parentheses: `(aa)(bb)*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRule {
    atoms: Vec<(Flag, Quantifier)>,
}

impl CompoundRule {
    pub fn parse(pattern: &str, mode: FlagMode) -> Result<Self, String> {
        let mut atoms: Vec<(Flag, Quantifier)> = Vec::new();
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            let flag = match c {
                '*' | '?' => return Err(format!("quantifier {c:?} without a flag")),
                '(' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for next in chars.by_ref() {
                        if next == ')' {
                            closed = true;
                            break;
                        }
                        inner.push(next);
                    }
                    if !closed {
                        return Err("unterminated parenthesis".to_string());
                    }
                    mode.parse_flag(&inner)?
                }
                other if mode == FlagMode::Char || mode == FlagMode::Utf8 => Flag(u32::from(other)),
                other => return Err(format!("flag {other:?} must be parenthesized in this flag mode")),
            };
            let quantifier = match chars.peek() {
                Some('*') => {
                    chars.next();
                    Quantifier::ZeroOrMore
                }
                Some('?') => {
                    chars.next();
                    Quantifier::ZeroOrOne
                }
                _ => Quantifier::One,
            };
            atoms.push((flag, quantifier));
        }
        if atoms.is_empty() {
            return Err("empty compound rule".to_string());
        }
        Ok(Self { atoms })
    }

    /// Flags mentioned by the rule.
    pub fn flags(&self) -> impl Iterator<Item = Flag> + '_ {
        self.atoms.iter().map(|&(flag, _)| flag)
    }

    /// Atom positions reachable before any part is consumed.
    ///
    /// Position `atoms.len()` is the accepting state.
    pub fn start(&self) -> Vec<usize> {
        let mut states = Vec::new();
        self.close(0, &mut states);
        states
    }

    /// Positions reachable from `states` after one part carrying `flags`.
    /// The result is sorted, so equal state sets compare equal.
    pub fn advance(&self, states: &[usize], flags: &FlagSet) -> Vec<usize> {
        let mut next = Vec::new();
        for &state in states {
            let Some(&(flag, quantifier)) = self.atoms.get(state) else {
                continue;
            };
            if !flags.contains(flag) {
                continue;
            }
            match quantifier {
                Quantifier::ZeroOrMore => self.close(state, &mut next),
                Quantifier::One | Quantifier::ZeroOrOne => self.close(state + 1, &mut next),
            }
        }
        next.sort_unstable();
        next
    }

    /// Whether `states` includes the end of the pattern.
    pub fn accepts(&self, states: &[usize]) -> bool {
        states.contains(&self.atoms.len())
    }

    /// Whether the flag sets of consecutive compound parts match the whole rule.
    pub fn matches(&self, parts: &[&FlagSet]) -> bool {
        let states = parts
            .iter()
            .fold(self.start(), |states, flags| self.advance(&states, flags));
        self.accepts(&states)
    }

    fn close(&self, state: usize, out: &mut Vec<usize>) {
        if out.contains(&state) {
            return;
        }
        out.push(state);
        if let Some(&(_, quantifier)) = self.atoms.get(state) {
            if quantifier != Quantifier::One {
                self.close(state + 1, out);
            }
        }
    }
}
