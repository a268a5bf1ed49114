// hunspell-suggest: Generate spelling suggestions.
//
// Prints suggestions for misspelled words. Correctly spelled words are
// printed as-is.
//
// Usage:
//   hunspell-suggest [-d DICT_PATH] [-l LANG] [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict-path PATH     Directory searched first for LANG.aff / LANG.dic
//   -l, --lang LANG          Dictionary name (default: from the locale)
//   -n, --max-suggestions N  Maximum number of suggestions (default: 15)
//   -h, --help               Print help

use std::io::{self, Write};

fn main() {
    hunspell_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = hunspell_cli::parse_common_args(&args).unwrap_or_else(|e| hunspell_cli::fatal(&e));

    if hunspell_cli::wants_help(&args.rest) {
        println!("hunspell-suggest: Generate spelling suggestions.");
        println!();
        println!("Usage: hunspell-suggest [-d DICT_PATH] [-l LANG] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Directory searched first for LANG.aff / LANG.dic");
        println!("  -l, --lang LANG          Dictionary name (default: from the locale)");
        println!("  -n, --max-suggestions N  Maximum number of suggestions (default: 15)");
        println!("  -h, --help               Print this help");
        return;
    }

    let mut max_suggestions: Option<usize> = None;
    let mut words: Vec<String> = Vec::new();
    let mut iter = args.rest.iter();

    while let Some(arg) = iter.next() {
        if arg == "-n" || arg == "--max-suggestions" {
            let Some(value) = iter.next() else {
                hunspell_cli::fatal("--max-suggestions requires a value");
            };
            max_suggestions = Some(
                value
                    .parse()
                    .unwrap_or_else(|_| hunspell_cli::fatal("invalid number for --max-suggestions")),
            );
        } else if !arg.starts_with('-') {
            words.push(arg.clone());
        }
    }

    let mut handle = hunspell_cli::load_handle(&args).unwrap_or_else(|e| hunspell_cli::fatal(&e));
    if let Some(max) = max_suggestions {
        handle.set_max_suggestions(max);
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    hunspell_cli::for_each_word(&words, |word| {
        if handle.spell(word) {
            let _ = writeln!(out, "{word} (correct)");
            return;
        }
        let suggestions = handle.suggest(word);
        if suggestions.is_empty() {
            let _ = writeln!(out, "{word}: (no suggestions)");
        } else {
            let _ = writeln!(out, "{word}:");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }
    });
}
