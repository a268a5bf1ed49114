// hunspell-cli: shared utilities for CLI tools.

use std::ffi::OsString;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use hunspell_engine::source::locale_language;
use hunspell_engine::{DictionarySource, Hunspell, HunspellError};
use log::debug;

/// Command line options shared by every tool.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    /// `-d/--dict-path`: directory searched before the standard locations.
    pub dict_path: Option<String>,
    /// `-l/--lang`: dictionary name, e.g. `en_US`.
    pub lang: Option<String>,
    /// Everything else, in order.
    pub rest: Vec<String>,
}

/// Parse `-d PATH`, `--dict-path=PATH`, `-l LANG` and `--lang=LANG`.
pub fn parse_common_args(args: &[String]) -> Result<CommonArgs, String> {
    let mut parsed = CommonArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--dict-path=") {
            parsed.dict_path = Some(val.to_string());
        } else if let Some(val) = arg.strip_prefix("--lang=") {
            parsed.lang = Some(val.to_string());
        } else if arg == "--dict-path" || arg == "-d" {
            let val = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
            parsed.dict_path = Some(val.clone());
        } else if arg == "--lang" || arg == "-l" {
            let val = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
            parsed.lang = Some(val.clone());
        } else {
            parsed.rest.push(arg.clone());
        }
    }

    Ok(parsed)
}

/// Build the list of directories to search for dictionary files.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. every entry of the `DICPATH` environment variable
/// 3. `~/.hunspell`
/// 4. `/usr/share/hunspell`, `/usr/share/myspell`
/// 5. Current working directory
pub fn search_paths(
    dict_path: Option<&str>,
    dicpath: Option<OsString>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }
    if let Some(value) = dicpath {
        paths.extend(std::env::split_paths(&value));
    }
    if let Some(home) = home {
        paths.push(home.join(".hunspell"));
    }
    paths.push(PathBuf::from("/usr/share/hunspell"));
    paths.push(PathBuf::from("/usr/share/myspell"));
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// The first directory holding both `<lang>.aff` and `<lang>.dic`.
pub fn find_dictionary(paths: &[PathBuf], lang: &str) -> Option<PathBuf> {
    paths
        .iter()
        .find(|dir| has_dictionary(dir, lang))
        .cloned()
}

fn has_dictionary(dir: &Path, lang: &str) -> bool {
    dir.join(format!("{lang}.aff")).is_file() && dir.join(format!("{lang}.dic")).is_file()
}

/// Search for dictionary files and create a handle.
///
/// The language comes from `--lang`, else from the locale variables.
pub fn load_handle(args: &CommonArgs) -> Result<Hunspell, String> {
    let lang = match &args.lang {
        Some(lang) => lang.clone(),
        None => locale_language(|name| std::env::var(name).ok())
            .ok_or("no language given: use --lang or set LANG (e.g. en_US.UTF-8)")?,
    };
    let paths = search_paths(
        args.dict_path.as_deref(),
        std::env::var_os("DICPATH"),
        std::env::var_os("HOME").map(PathBuf::from),
    );

    let Some(dir) = find_dictionary(&paths, &lang) else {
        return Err(format!(
            "could not find {lang}.aff and {lang}.dic in any of the search paths:\n{}",
            paths
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n")
        ));
    };
    debug!("using dictionary {lang} in {}", dir.display());

    Hunspell::from_source(DictionarySource::directory(dir, Some(&lang)))
        .map_err(|e: HunspellError| format!("failed to load {lang}: {e}"))
}

/// Route `log` output to stderr; `RUST_LOG` overrides the default level.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Run `f` on each word: the positional arguments if any, otherwise each
/// non-empty line of stdin.
pub fn for_each_word(words: &[String], mut f: impl FnMut(&str)) {
    if !words.is_empty() {
        for word in words {
            f(word);
        }
        return;
    }
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if !word.is_empty() {
            f(word);
        }
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
