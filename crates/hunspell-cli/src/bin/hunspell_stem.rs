// hunspell-stem: Print the stems of words.
//
// Usage:
//   hunspell-stem [-d DICT_PATH] [-l LANG] [WORD...]
//
// Options:
//   -d, --dict-path PATH   Directory searched first for LANG.aff / LANG.dic
//   -l, --lang LANG        Dictionary name (default: from the locale)
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    hunspell_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = hunspell_cli::parse_common_args(&args).unwrap_or_else(|e| hunspell_cli::fatal(&e));

    if hunspell_cli::wants_help(&args.rest) {
        println!("hunspell-stem: Print the stems of words.");
        println!();
        println!("Usage: hunspell-stem [-d DICT_PATH] [-l LANG] [WORD...]");
        println!();
        println!("If WORD arguments are given, stems each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Directory searched first for LANG.aff / LANG.dic");
        println!("  -l, --lang LANG        Dictionary name (default: from the locale)");
        println!("  -h, --help             Print this help");
        return;
    }

    let words: Vec<String> = args.rest.iter().filter(|a| !a.starts_with('-')).cloned().collect();
    let handle = hunspell_cli::load_handle(&args).unwrap_or_else(|e| hunspell_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    hunspell_cli::for_each_word(&words, |word| {
        let stems = handle.stem(word);
        if stems.is_empty() {
            let _ = writeln!(out, "{word}: (no stem)");
        } else {
            let _ = writeln!(out, "{word}: {}", stems.join(" "));
        }
    });
}
