// hunspell-spell: Check spelling of words.
//
// Reports whether each word is correctly spelled:
//   C: word    (correct)
//   W: word    (wrong / misspelled)
//
// Usage:
//   hunspell-spell [-d DICT_PATH] [-l LANG] [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict-path PATH   Directory searched first for LANG.aff / LANG.dic
//   -l, --lang LANG        Dictionary name (default: from the locale)
//   -s, --suggest          Also print suggestions for misspelled words
//   --no-numbers           Do not accept numbers
//   --no-dots              Do not accept trailing abbreviation dots
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    hunspell_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = hunspell_cli::parse_common_args(&args).unwrap_or_else(|e| hunspell_cli::fatal(&e));

    if hunspell_cli::wants_help(&args.rest) {
        println!("hunspell-spell: Check spelling of words.");
        println!();
        println!("Usage: hunspell-spell [-d DICT_PATH] [-l LANG] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, checks each word.");
        println!("Otherwise reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Directory searched first for LANG.aff / LANG.dic");
        println!("  -l, --lang LANG        Dictionary name (default: from the locale)");
        println!("  -s, --suggest          Also print suggestions for misspelled words");
        println!("  --no-numbers           Do not accept numbers");
        println!("  --no-dots              Do not accept trailing abbreviation dots");
        println!("  -h, --help             Print this help");
        return;
    }

    let show_suggestions = args.rest.iter().any(|a| a == "-s" || a == "--suggest");
    let no_numbers = args.rest.iter().any(|a| a == "--no-numbers");
    let no_dots = args.rest.iter().any(|a| a == "--no-dots");
    let words: Vec<String> = args.rest.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let mut handle = hunspell_cli::load_handle(&args).unwrap_or_else(|e| hunspell_cli::fatal(&e));
    if no_numbers {
        handle.set_ignore_numbers(false);
    }
    if no_dots {
        handle.set_ignore_dot(false);
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    hunspell_cli::for_each_word(&words, |word| {
        if handle.spell(word) {
            let _ = writeln!(out, "C: {word}");
        } else {
            let _ = writeln!(out, "W: {word}");
            if show_suggestions {
                for suggestion in handle.suggest(word) {
                    let _ = writeln!(out, "S: {suggestion}");
                }
            }
        }
    });
}
