//! Golden tests: spell, analyze and stem results for the test dictionary
//! compared against `tests/data/golden.json`.
//!
//! Run: cargo test -p hunspell-engine --test golden

use std::collections::BTreeMap;
use std::path::PathBuf;

use hunspell_engine::Hunspell;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SpellCases {
    correct: Vec<String>,
    incorrect: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Golden {
    spell: SpellCases,
    analyze: BTreeMap<String, Vec<String>>,
    stem: BTreeMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn load_golden() -> Golden {
    let path = data_dir().join("golden.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn create_handle() -> Hunspell {
    let dir = data_dir();
    Hunspell::new(dir.join("en_test.aff"), dir.join("en_test.dic"))
        .unwrap_or_else(|e| panic!("failed to load test dictionary: {}", e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn golden_spell() {
    let golden = load_golden();
    let handle = create_handle();

    let mut mismatches = Vec::new();
    for word in &golden.spell.correct {
        if !handle.spell(word) {
            mismatches.push(format!("expected correct: {word:?}"));
        }
    }
    for word in &golden.spell.incorrect {
        if handle.spell(word) {
            mismatches.push(format!("expected incorrect: {word:?}"));
        }
    }
    assert!(mismatches.is_empty(), "spell mismatches:\n{}", mismatches.join("\n"));
}

#[test]
fn golden_analyze() {
    let golden = load_golden();
    let handle = create_handle();

    let mut mismatches = Vec::new();
    for (word, expected) in &golden.analyze {
        let actual = handle.analyze(word);
        if &actual != expected {
            mismatches.push(format!("{word}: expected {expected:?}, got {actual:?}"));
        }
    }
    assert!(mismatches.is_empty(), "analyze mismatches:\n{}", mismatches.join("\n"));
}

#[test]
fn golden_stem() {
    let golden = load_golden();
    let handle = create_handle();

    let mut mismatches = Vec::new();
    for (word, expected) in &golden.stem {
        let actual = handle.stem(word);
        if &actual != expected {
            mismatches.push(format!("{word}: expected {expected:?}, got {actual:?}"));
        }
    }
    assert!(mismatches.is_empty(), "stem mismatches:\n{}", mismatches.join("\n"));
}
