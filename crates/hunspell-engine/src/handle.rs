// Hunspell: top-level handle for one loaded dictionary.
//
// Owns the affix table, the dictionary store, the runtime overlay and the
// suggestion strategy, and provides spell checking, suggestion generation,
// morphological analysis, stemming and runtime word list changes.
//
// Design notes:
// - Affix table and store are immutable after load and read without locks.
// - The overlay sits behind a read-write lock. Each query holds one read
//   guard for its whole duration, so it sees a single overlay state.
// - Checkers are lightweight borrowed views created per call.

use std::cell::Cell;

use log::{info, warn};

use hunspell_core::case::{CaseType, detect_case};
use hunspell_core::character::simple_lower;
use hunspell_core::encoding::TextEncoding;
use hunspell_core::enums::{DEFAULT_MAX_SUGGESTIONS, MAX_WORD_CHARS, OverlayStatus, SpellResult};
use hunspell_dict::{AffixTable, DictionaryStore, ParseError};

use crate::lookup::{LayeredLookup, WordLookup};
use crate::morphology::{analysis, expand};
use crate::overlay::{OverlayState, RuntimeOverlay};
use crate::source::{ConfigurationError, DictionarySource};
use crate::speller::Speller;
use crate::speller::dictionary::DictionarySpeller;
use crate::speller::pipeline::{CheckPipeline, SpellOptions, normalize};
use crate::suggestion::status::SuggestionStatus;
use crate::suggestion::strategy::{DEFAULT_MAX_COST, SuggestionStrategy};

/// Error type for Hunspell construction failures.
#[derive(Debug, thiserror::Error)]
pub enum HunspellError {
    /// The dictionary files could not be found or read.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The affix file is malformed.
    #[error("affix file: {0}")]
    Affix(#[source] ParseError),

    /// The word list is malformed or uses undeclared flags.
    #[error("dictionary file: {0}")]
    Dictionary(#[source] ParseError),
}

/// Engine-wide tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Upper bound on the number of suggestions returned.
    pub max_suggestions: usize,
    /// Spell checks one suggestion request may spend.
    pub suggestion_cost: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            suggestion_cost: DEFAULT_MAX_COST,
        }
    }
}

/// Spell checker for one dictionary.
///
/// `Hunspell` is `Send + Sync`: queries and runtime word list changes may
/// be issued from any number of threads through a shared reference.
pub struct Hunspell {
    table: AffixTable,
    store: DictionaryStore,
    overlay: RuntimeOverlay,
    strategy: SuggestionStrategy,
    spell_options: SpellOptions,
    options: EngineOptions,
    /// Where the dictionary was read from, for [`Hunspell::reload`].
    source: Option<DictionarySource>,
}

impl Hunspell {
    /// Load the dictionary from an affix file and a word list.
    pub fn new(
        affix: impl Into<std::path::PathBuf>,
        dictionary: impl Into<std::path::PathBuf>,
    ) -> Result<Self, HunspellError> {
        Self::from_source(DictionarySource::files(affix, dictionary))
    }

    /// Load the dictionary `source` resolves to.
    pub fn from_source(source: DictionarySource) -> Result<Self, HunspellError> {
        let (affix, dictionary) = source.read()?;
        let mut handle = Self::from_bytes(&affix, &dictionary)?;
        handle.source = Some(source);
        Ok(handle)
    }

    /// Load from raw file contents. The text encoding comes from the
    /// affix file's `SET` line; an unknown label is kept and its bytes are
    /// read as Latin-1 code points.
    pub fn from_bytes(affix: &[u8], dictionary: &[u8]) -> Result<Self, HunspellError> {
        let encoding = match AffixTable::sniff_encoding_label(affix) {
            Some(label) => match TextEncoding::from_label(&label) {
                Ok(encoding) => encoding,
                Err(err) => {
                    warn!("{err}; reading dictionary bytes unchanged");
                    TextEncoding::Raw(label)
                }
            },
            None => TextEncoding::default(),
        };
        Self::from_text(&encoding.decode(affix), &encoding.decode(dictionary))
    }

    /// Load from already decoded affix and word list text.
    pub fn from_text(affix: &str, dictionary: &str) -> Result<Self, HunspellError> {
        let table = AffixTable::parse(affix).map_err(HunspellError::Affix)?;
        let store = DictionaryStore::parse(dictionary, &table).map_err(HunspellError::Dictionary)?;
        let options = EngineOptions::default();
        let strategy = SuggestionStrategy::for_table(&table, &store, options.suggestion_cost);
        info!(
            "loaded {} words, {} affix rules, encoding {}",
            store.len(),
            table.prefixes().len() + table.suffixes().len(),
            table.encoding()
        );
        Ok(Self {
            table,
            store,
            overlay: RuntimeOverlay::new(),
            strategy,
            spell_options: SpellOptions::default(),
            options,
            source: None,
        })
    }

    /// Read the dictionary files again and drop every runtime change.
    ///
    /// A handle built from bytes or text keeps its tables and only loses
    /// its overlay. On error the handle is left unchanged.
    pub fn reload(&mut self) -> Result<(), HunspellError> {
        if let Some(source) = self.source.take() {
            let loaded = Self::from_source(source.clone());
            self.source = Some(source);
            let loaded = loaded?;
            self.table = loaded.table;
            self.store = loaded.store;
            self.strategy = SuggestionStrategy::for_table(
                &self.table,
                &self.store,
                self.options.suggestion_cost,
            );
        }
        self.overlay.clear();
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    fn with_pipeline<R>(&self, f: impl FnOnce(&CheckPipeline<'_>) -> R) -> R {
        let overlay = self.overlay.read();
        let lookup = LayeredLookup::new(&self.store, &overlay);
        let meter = Cell::new(0);
        let pipeline = CheckPipeline::new(
            DictionarySpeller::new(&self.table, &lookup).with_meter(&meter),
            &overlay,
            &self.spell_options,
        );
        f(&pipeline)
    }

    fn with_dictionary<R>(&self, f: impl FnOnce(&DictionarySpeller<'_>) -> R) -> R {
        let overlay = self.overlay.read();
        let lookup = LayeredLookup::new(&self.store, &overlay);
        f(&DictionarySpeller::new(&self.table, &lookup))
    }

    /// Detailed spell check result.
    pub fn check(&self, word: &str) -> SpellResult {
        self.with_pipeline(|pipeline| pipeline.spell(word))
    }

    /// Check whether a word is correctly spelled.
    ///
    /// Empty input is never correct. A lowercase word that is only valid
    /// capitalized, like `paris`, is incorrect.
    pub fn spell(&self, word: &str) -> bool {
        self.check(word).is_correct()
    }

    /// Generate spelling suggestions for a misspelled word.
    ///
    /// Correct words get an empty list. Every suggestion returned is
    /// itself correct; words flagged NOSUGGEST are never offered.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let normalized = normalize(word);
        if normalized.trim().is_empty() || normalized.chars().count() > MAX_WORD_CHARS {
            return Vec::new();
        }
        self.with_pipeline(|pipeline| {
            if pipeline.spell(word).is_correct() {
                return Vec::new();
            }
            let case = detect_case(&normalized);
            let restore = matches!(case, CaseType::FirstUpper | CaseType::AllUpper);
            let working: Vec<char> = if restore {
                normalized.chars().map(simple_lower).collect()
            } else {
                normalized.chars().collect()
            };

            // Collect extra candidates, rank, then truncate.
            let mut status =
                SuggestionStatus::new(&working, &normalized, self.options.max_suggestions * 3);
            if restore {
                status = status.with_restored_case(case);
            }
            self.strategy.generate(pipeline, &mut status);

            status
                .into_suggestions()
                .into_iter()
                .filter(|s| pipeline.spell(&s.word) == SpellResult::Ok)
                .take(self.options.max_suggestions)
                .map(|s| s.word)
                .collect()
        })
    }

    /// Morphological analyses of `word`, one line per way it is derived.
    pub fn analyze(&self, word: &str) -> Vec<String> {
        let normalized = normalize(word);
        self.with_dictionary(|speller| analysis::analyze(speller, &normalized))
    }

    /// Base forms of `word`, without duplicates.
    pub fn stem(&self, word: &str) -> Vec<String> {
        let normalized = normalize(word);
        self.with_dictionary(|speller| analysis::stem(speller, &normalized))
    }

    /// Every surface form the entry spelled exactly `word` generates,
    /// itself first unless it needs an affix.
    pub fn expand(&self, word: &str) -> Vec<String> {
        let overlay = self.overlay.read();
        let lookup = LayeredLookup::new(&self.store, &overlay);
        match lookup.lookup(word) {
            Some(entry) => expand(&self.table, entry).map(|e| e.form).collect(),
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Runtime word list
    // =========================================================================

    /// Accept `word` from now on.
    pub fn add(&self, word: &str) -> OverlayStatus {
        self.overlay.add(&self.store, word)
    }

    /// Accept `word` and inflect it like the dictionary word `exemplar`.
    pub fn add_with_affix(&self, word: &str, exemplar: &str) -> OverlayStatus {
        self.overlay.add_with_affix(&self.store, word, exemplar)
    }

    /// Reject `word` from now on. Only currently accepted words can be
    /// removed; whatever `spell` accepts, `remove` can reject.
    pub fn remove(&self, word: &str) -> OverlayStatus {
        let table = &self.table;
        let options = &self.spell_options;
        self.overlay.remove(&self.store, word, |state, lookup| {
            let pipeline = CheckPipeline::new(DictionarySpeller::new(table, lookup), state, options);
            if pipeline.spell(word).is_correct() {
                Some(pipeline.removal_key(word))
            } else {
                None
            }
        })
    }

    /// Snapshot of the runtime changes.
    pub fn overlay(&self) -> OverlayState {
        self.overlay.read().clone()
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    pub fn encoding(&self) -> &TextEncoding {
        self.table.encoding()
    }

    /// Encoding identifier of the dictionary, e.g. `UTF-8`.
    pub fn dic_encoding(&self) -> &str {
        self.table.encoding().name()
    }

    /// Convert text to bytes in the dictionary encoding.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.table.encoding().encode(text)
    }

    /// Convert bytes in the dictionary encoding to text.
    pub fn decode(&self, bytes: &[u8]) -> String {
        self.table.encoding().decode(bytes)
    }

    // =========================================================================
    // Accessors and options
    // =========================================================================

    pub fn affix_table(&self) -> &AffixTable {
        &self.table
    }

    pub fn dictionary(&self) -> &DictionaryStore {
        &self.store
    }

    /// Number of words in the loaded word list.
    pub fn word_count(&self) -> usize {
        self.store.len()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn spell_options(&self) -> &SpellOptions {
        &self.spell_options
    }

    pub fn set_max_suggestions(&mut self, value: usize) {
        self.options.max_suggestions = value;
    }

    pub fn set_suggestion_cost(&mut self, value: usize) {
        self.options.suggestion_cost = value;
        self.strategy.set_max_cost(value);
    }

    pub fn set_ignore_numbers(&mut self, value: bool) {
        self.spell_options.ignore_numbers = value;
    }

    pub fn set_ignore_dot(&mut self, value: bool) {
        self.spell_options.ignore_dot = value;
    }

    pub fn set_accept_phrases(&mut self, value: bool) {
        self.spell_options.accept_phrases = value;
    }
}
