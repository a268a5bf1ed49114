//! Integration tests over the test dictionary in `tests/data`.
//!
//! Run: cargo test -p hunspell-engine --test engine

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hunspell_core::enums::OverlayStatus;
use hunspell_dict::ParseError;
use hunspell_engine::morphology::{expand, reduce};
use hunspell_engine::{ConfigurationError, DictionarySource, Hunspell, HunspellError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn create_handle() -> Hunspell {
    let dir = data_dir();
    Hunspell::new(dir.join("en_test.aff"), dir.join("en_test.dic"))
        .unwrap_or_else(|e| panic!("failed to load test dictionary: {}", e))
}

const MISSPELLINGS: &[&str] = &[
    "helo", "wrold", "fone", "cafee", "footbal", "alot", "HELO", "Helo", "paris", "runing",
    "walkt", "kindnes", "helloworld", "damm", "irregardles", "xyzzy",
];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn loads_from_files_and_directory() {
    let handle = create_handle();
    assert_eq!(handle.word_count(), 21);
    assert_eq!(handle.dic_encoding(), "UTF-8");

    let by_language =
        Hunspell::from_source(DictionarySource::directory(data_dir(), Some("en_test"))).unwrap();
    assert_eq!(by_language.word_count(), 21);
}

#[test]
fn missing_sources_are_configuration_errors() {
    let result = Hunspell::from_source(DictionarySource::directory(data_dir(), Some("xx_XX")));
    assert!(matches!(
        result,
        Err(HunspellError::Configuration(ConfigurationError::MissingAffixFile(_)))
    ));
}

#[test]
fn undeclared_flag_fails_the_load() {
    let affix = std::fs::read(data_dir().join("en_test.aff")).unwrap();
    let result = Hunspell::from_bytes(&affix, b"3\nhello\nworld/S\nbroken/SQ\n");
    match result {
        Err(HunspellError::Dictionary(ParseError::UndeclaredFlag { line, word, .. })) => {
            assert_eq!(line, 4);
            assert_eq!(word, "broken");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("load with an undeclared flag succeeded"),
    }
}

#[test]
fn reload_rereads_files_and_clears_overlay() {
    let mut handle = create_handle();
    assert_eq!(handle.add("blorp"), OverlayStatus::Added);
    assert_eq!(handle.remove("hello"), OverlayStatus::Removed);
    handle.reload().unwrap();
    assert!(!handle.spell("blorp"));
    assert!(handle.spell("hello"));
    assert_eq!(handle.word_count(), 21);
}

// ---------------------------------------------------------------------------
// Morphology
// ---------------------------------------------------------------------------

#[test]
fn stem_of_running_is_run() {
    let handle = create_handle();
    assert_eq!(handle.stem("running"), vec!["run"]);
}

#[test]
fn every_generated_form_reduces_to_its_entry() {
    let handle = create_handle();
    let table = handle.affix_table();
    let store = handle.dictionary();
    for entry in store.iter() {
        for expanded in expand(table, entry) {
            let found = reduce(table, store, &expanded.form);
            assert!(
                found
                    .iter()
                    .any(|r| r.entry.word == entry.word && r.chain == expanded.chain),
                "{} from {} via {:?}",
                expanded.form,
                entry.word,
                expanded.chain
            );
        }
    }
}

#[test]
fn generated_forms_of_standalone_words_spell_correctly() {
    let handle = create_handle();
    for word in ["run", "walk", "try", "kind", "do", "couth", "hello", "ball"] {
        let forms = handle.expand(word);
        assert!(!forms.is_empty(), "{word}");
        for form in forms {
            assert!(handle.spell(&form), "{form} from {word}");
        }
    }
    assert!(!handle.expand("couth").contains(&"couth".to_string()));
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[test]
fn suggestions_always_spell_check() {
    let handle = create_handle();
    for word in MISSPELLINGS {
        for suggestion in handle.suggest(word) {
            assert!(handle.spell(&suggestion), "{suggestion:?} suggested for {word:?}");
        }
    }
}

#[test]
fn correct_words_get_no_suggestions() {
    let handle = create_handle();
    for word in ["hello", "running", "Paris", "football", "a lot", "42", "damn"] {
        assert!(handle.suggest(word).is_empty(), "{word}");
    }
}

#[test]
fn typical_corrections() {
    let handle = create_handle();
    let contains = |word: &str, expected: &str| {
        let found = handle.suggest(word);
        assert!(
            found.iter().any(|s| s == expected),
            "{expected:?} not in suggestions for {word:?}: {found:?}"
        );
    };
    contains("helo", "hello");
    contains("wrold", "world");
    contains("fone", "phone");
    contains("cafee", "cafe");
    contains("footbal", "football");
    contains("alot", "a lot");
    contains("helloworld", "hello world");
    contains("HELO", "HELLO");
    contains("Helo", "Hello");
    contains("runing", "running");
    assert_eq!(handle.suggest("paris"), vec!["Paris"]);
}

#[test]
fn table_replacement_ranks_first() {
    let handle = create_handle();
    assert_eq!(handle.suggest("fone").first().map(String::as_str), Some("phone"));
}

#[test]
fn suggestions_are_unique_and_bounded() {
    let mut handle = create_handle();
    for word in MISSPELLINGS {
        let found = handle.suggest(word);
        let mut unique = found.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), found.len(), "{word}: {found:?}");
        assert!(found.len() <= 15);
    }
    handle.set_max_suggestions(2);
    assert!(handle.suggest("helo").len() <= 2);
}

#[test]
fn suggestions_are_deterministic() {
    let handle = create_handle();
    for word in MISSPELLINGS {
        assert_eq!(handle.suggest(word), handle.suggest(word), "{word}");
    }
}

#[test]
fn hidden_words_are_never_suggested() {
    let handle = create_handle();
    assert!(!handle.suggest("damm").contains(&"damn".to_string()));
    assert!(!handle.suggest("irregardles").contains(&"irregardless".to_string()));
    assert!(!handle.suggest("sportt").contains(&"sport".to_string()));
}

// ---------------------------------------------------------------------------
// Runtime overlay
// ---------------------------------------------------------------------------

#[test]
fn remove_then_add_round_trip() {
    let handle = create_handle();
    assert!(handle.spell("hello"));
    assert_eq!(handle.remove("hello"), OverlayStatus::Removed);
    assert!(!handle.spell("hello"));
    assert!(!handle.spell("Hello"));
    assert_eq!(handle.remove("hello"), OverlayStatus::NotFound);
    assert_eq!(handle.add("hello"), OverlayStatus::Added);
    assert!(handle.spell("hello"));
    assert_eq!(handle.add("hello"), OverlayStatus::Duplicate);
}

#[test]
fn remove_rejects_every_spelling_spell_accepted() {
    let handle = create_handle();
    assert_eq!(handle.add("don't"), OverlayStatus::Added);
    for word in ["hello-world", "42", "don\u{2019}t", "world."] {
        assert!(handle.spell(word), "{word} before removal");
        assert_eq!(handle.remove(word), OverlayStatus::Removed, "{word}");
        assert!(!handle.spell(word), "{word} after removal");
        assert_eq!(handle.remove(word), OverlayStatus::NotFound, "{word}");
    }
    assert!(!handle.spell("world"));
    assert!(!handle.spell("don't"));
    assert!(handle.spell("hello"));
}

#[test]
fn add_with_affix_reports_duplicates() {
    let handle = create_handle();
    assert_eq!(handle.add_with_affix("walk", "run"), OverlayStatus::Duplicate);
    assert!(!handle.spell("walkning"));
    assert_eq!(handle.add_with_affix("jog", "walk"), OverlayStatus::Added);
    assert_eq!(handle.add_with_affix("jog", "walk"), OverlayStatus::Duplicate);
    assert_eq!(handle.add("jog"), OverlayStatus::Duplicate);
    assert_eq!(handle.overlay().added_count(), 1);
}

#[test]
fn long_unsplittable_compounds_finish_quickly() {
    let handle = Hunspell::from_text(
        "SET UTF-8\nCOMPOUNDFLAG C\nCOMPOUNDMIN 1\n",
        "5\na/C\naa/C\naaa/C\naaaa/C\naaaaa/C\n",
    )
    .unwrap();
    let started = Instant::now();

    assert!(handle.spell(&"a".repeat(40)));
    assert!(!handle.spell(&format!("{}b", "a".repeat(99))));
    assert!(!handle.spell(&"a".repeat(101)));
    for suggestion in handle.suggest(&format!("{}b", "a".repeat(40))) {
        assert!(handle.spell(&suggestion), "{suggestion}");
    }

    assert!(
        started.elapsed() < Duration::from_secs(10),
        "took {:?}",
        started.elapsed()
    );
}

#[test]
fn words_at_the_length_limit() {
    let handle = create_handle();
    let at_limit = "a".repeat(100);
    assert!(!handle.spell(&at_limit));
    assert_eq!(handle.add(&at_limit), OverlayStatus::Added);
    assert!(handle.spell(&at_limit));
    assert_eq!(handle.remove(&at_limit), OverlayStatus::Removed);

    let too_long = "a".repeat(101);
    assert_eq!(handle.add(&too_long), OverlayStatus::InvalidWord);
    assert!(!handle.spell(&too_long));
    assert!(handle.suggest(&too_long).is_empty());
}

#[test]
fn add_with_affix_inflects_like_the_exemplar() {
    let handle = create_handle();
    assert!(!handle.spell("jogging"));
    assert_eq!(handle.add_with_affix("jog", "walk"), OverlayStatus::Added);
    assert!(handle.spell("jog"));
    assert!(handle.spell("jogs"));
    assert!(handle.spell("joged"));
    assert!(handle.spell("joging"));
    assert_eq!(handle.stem("jogs"), vec!["jog"]);
    assert_eq!(
        handle.add_with_affix("zorb", "nonexistent"),
        OverlayStatus::ExemplarNotFound
    );
    assert_eq!(handle.add(""), OverlayStatus::InvalidWord);
}

#[test]
fn added_words_are_offered_as_suggestions() {
    let handle = create_handle();
    assert!(!handle.suggest("blorb").contains(&"blorp".to_string()));
    handle.add("blorp");
    assert!(handle.suggest("blorb").contains(&"blorp".to_string()));
}

#[test]
fn overlay_does_not_touch_the_store() {
    let handle = create_handle();
    handle.add("blorp");
    handle.remove("world");
    assert!(handle.dictionary().contains("world"));
    assert!(!handle.dictionary().contains("blorp"));
    assert_eq!(handle.word_count(), 21);
}

#[test]
fn concurrent_mutation_and_queries() {
    let handle = Arc::new(create_handle());
    let mut workers = Vec::new();

    for t in 0..4 {
        let handle = Arc::clone(&handle);
        workers.push(thread::spawn(move || {
            for i in 0..50 {
                let word = format!("word{t}x{i}");
                assert_eq!(handle.add(&word), OverlayStatus::Added);
                assert!(handle.spell(&word));
                assert_eq!(handle.remove(&word), OverlayStatus::Removed);
                assert!(!handle.spell(&word));
            }
        }));
    }
    for _ in 0..4 {
        let handle = Arc::clone(&handle);
        workers.push(thread::spawn(move || {
            for _ in 0..50 {
                assert!(handle.spell("running"));
                assert!(handle.spell("football"));
                assert_eq!(handle.stem("tried"), vec!["try"]);
                assert!(!handle.suggest("helo").is_empty());
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(handle.word_count(), 21);
    assert!(handle.spell("hello"));
    assert_eq!(handle.overlay().added_count(), 0);
}
