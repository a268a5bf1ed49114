// Resolving the affix file and word list a handle is loaded from

use std::io;
use std::path::{Path, PathBuf};

/// Locale variables consulted for a default language, in priority order.
const LOCALE_VARIABLES: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// Error for dictionary sources that do not resolve to readable files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("affix file not found: {0}")]
    MissingAffixFile(PathBuf),
    #[error("dictionary file not found: {0}")]
    MissingDictionaryFile(PathBuf),
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no language given and none found in LC_ALL, LC_MESSAGES or LANG")]
    UnresolvedLanguage,
}

/// Where a dictionary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// An explicit `.aff` and `.dic` pair.
    Files { affix: PathBuf, dictionary: PathBuf },
    /// `<dir>/<lang>.aff` and `<dir>/<lang>.dic`; without a language the
    /// locale variables decide.
    Directory { dir: PathBuf, language: Option<String> },
}

impl DictionarySource {
    pub fn files(affix: impl Into<PathBuf>, dictionary: impl Into<PathBuf>) -> Self {
        DictionarySource::Files {
            affix: affix.into(),
            dictionary: dictionary.into(),
        }
    }

    pub fn directory(dir: impl Into<PathBuf>, language: Option<&str>) -> Self {
        DictionarySource::Directory {
            dir: dir.into(),
            language: language.filter(|l| !l.is_empty()).map(str::to_string),
        }
    }

    /// The `(affix, dictionary)` paths, checked to exist.
    pub fn resolve(&self) -> Result<(PathBuf, PathBuf), ConfigurationError> {
        let (affix, dictionary) = match self {
            DictionarySource::Files { affix, dictionary } => (affix.clone(), dictionary.clone()),
            DictionarySource::Directory { dir, language } => {
                let language = match language {
                    Some(language) => language.clone(),
                    None => locale_language(|name| std::env::var(name).ok())
                        .ok_or(ConfigurationError::UnresolvedLanguage)?,
                };
                (
                    dir.join(format!("{language}.aff")),
                    dir.join(format!("{language}.dic")),
                )
            }
        };
        if !affix.is_file() {
            return Err(ConfigurationError::MissingAffixFile(affix));
        }
        if !dictionary.is_file() {
            return Err(ConfigurationError::MissingDictionaryFile(dictionary));
        }
        Ok((affix, dictionary))
    }

    /// Read both files into memory.
    pub fn read(&self) -> Result<(Vec<u8>, Vec<u8>), ConfigurationError> {
        let (affix, dictionary) = self.resolve()?;
        Ok((read_file(&affix)?, read_file(&dictionary)?))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConfigurationError> {
    std::fs::read(path).map_err(|source| ConfigurationError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// The language of the first locale variable of the form
/// `language.charset`. Values without a charset, such as `C` or `POSIX`,
/// are skipped.
pub fn locale_language(var: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_VARIABLES.iter().find_map(|name| {
        let value = var(name)?;
        let (language, charset) = value.split_once('.')?;
        (!language.is_empty() && !charset.is_empty()).then(|| language.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn locale_priority_and_charset() {
        let vars = env(&[("LC_ALL", "de_DE.UTF-8"), ("LANG", "en_US.UTF-8")]);
        assert_eq!(locale_language(vars).as_deref(), Some("de_DE"));

        let vars = env(&[("LC_ALL", "C"), ("LC_MESSAGES", "fr_FR.ISO-8859-1")]);
        assert_eq!(locale_language(vars).as_deref(), Some("fr_FR"));

        let vars = env(&[("LANG", "en_US")]);
        assert_eq!(locale_language(vars), None);
        assert_eq!(locale_language(env(&[])), None);
    }

    #[test]
    fn directory_source_resolves_language_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en_US.aff"), "SET UTF-8\n").unwrap();
        std::fs::write(dir.path().join("en_US.dic"), "1\nhello\n").unwrap();

        let source = DictionarySource::directory(dir.path(), Some("en_US"));
        let (aff, dic) = source.resolve().unwrap();
        assert_eq!(aff, dir.path().join("en_US.aff"));
        assert_eq!(dic, dir.path().join("en_US.dic"));
        let (aff_bytes, dic_bytes) = source.read().unwrap();
        assert_eq!(aff_bytes, b"SET UTF-8\n");
        assert_eq!(dic_bytes, b"1\nhello\n");
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = DictionarySource::directory(dir.path(), Some("xx"));
        assert!(matches!(
            source.resolve(),
            Err(ConfigurationError::MissingAffixFile(_))
        ));

        std::fs::write(dir.path().join("xx.aff"), "").unwrap();
        assert!(matches!(
            source.resolve(),
            Err(ConfigurationError::MissingDictionaryFile(_))
        ));

        let source = DictionarySource::files(dir.path().join("xx.aff"), dir.path());
        assert!(matches!(
            source.resolve(),
            Err(ConfigurationError::MissingDictionaryFile(_))
        ));
    }

    #[test]
    fn empty_language_means_locale() {
        let source = DictionarySource::directory("/nowhere", Some(""));
        assert_eq!(
            source,
            DictionarySource::Directory {
                dir: PathBuf::from("/nowhere"),
                language: None,
            }
        );
    }
}
