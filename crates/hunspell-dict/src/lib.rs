//! Affix file (`.aff`) and word list (`.dic`) parsing.
//!
//! # Architecture
//!
//! - [`flags`] -- Flag encodings (single char, long, numeric, UTF-8) and flag sets
//! - [`condition`] -- Affix condition patterns (`.`, `[abc]`, `[^abc]`)
//! - [`compound`] -- `COMPOUNDRULE` patterns over flag sequences
//! - [`aff`] -- Affix rules and the global settings of an affix file
//! - [`dic`] -- Dictionary entries and the case-sensitive word store

pub mod aff;
pub mod compound;
pub mod condition;
pub mod dic;
pub mod flags;

pub use aff::{AffixKind, AffixRule, AffixTable, Replacement, RuleRef};
pub use dic::{DictionaryEntry, DictionaryStore};
pub use flags::{Flag, FlagMode, FlagSet};

/// Error type for affix file and word list parsing.
///
/// Line numbers are 1-based and refer to the file being parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: invalid FLAG mode {value:?}")]
    InvalidFlagMode { line: usize, value: String },
    #[error("line {line}: invalid flag {flag:?}: {reason}")]
    InvalidFlag {
        line: usize,
        flag: String,
        reason: String,
    },
    #[error("line {line}: malformed {directive} line: {reason}")]
    MalformedDirective {
        line: usize,
        directive: String,
        reason: String,
    },
    #[error("line {line}: malformed affix rule: {reason}")]
    MalformedRule { line: usize, reason: String },
    #[error("line {line}: invalid condition {condition:?}: {reason}")]
    InvalidCondition {
        line: usize,
        condition: String,
        reason: String,
    },
    #[error("dictionary is empty: expected an entry count on the first line")]
    MissingEntryCount,
    #[error("line {line}: invalid entry count {value:?}")]
    InvalidEntryCount { line: usize, value: String },
    #[error("line {line}: word {word:?} uses undeclared flag {flag:?}")]
    UndeclaredFlag {
        line: usize,
        word: String,
        flag: String,
    },
}
