// Word lookup seam between the dictionary store and the runtime overlay

use hunspell_dict::{DictionaryEntry, DictionaryStore};

use crate::overlay::OverlayState;

/// Case-sensitive lookup of dictionary entries by surface spelling.
///
/// Reduction and compound checking only see words through this trait, so
/// the same code runs against the bare store and against the store with
/// runtime additions and removals layered on top.
pub trait WordLookup {
    fn lookup(&self, word: &str) -> Option<&DictionaryEntry>;

    /// Whether `word` was removed at runtime and must be rejected.
    fn is_hidden(&self, _word: &str) -> bool {
        false
    }
}

impl WordLookup for DictionaryStore {
    fn lookup(&self, word: &str) -> Option<&DictionaryEntry> {
        self.get(word)
    }
}

/// The loaded store seen through the runtime overlay.
///
/// Removed words are invisible; added words shadow store entries.
#[derive(Clone, Copy)]
pub struct LayeredLookup<'a> {
    pub store: &'a DictionaryStore,
    pub overlay: &'a OverlayState,
}

impl<'a> LayeredLookup<'a> {
    pub fn new(store: &'a DictionaryStore, overlay: &'a OverlayState) -> Self {
        Self { store, overlay }
    }
}

impl WordLookup for LayeredLookup<'_> {
    fn lookup(&self, word: &str) -> Option<&DictionaryEntry> {
        if self.overlay.is_removed(word) {
            return None;
        }
        self.overlay.added(word).or_else(|| self.store.get(word))
    }

    fn is_hidden(&self, word: &str) -> bool {
        self.overlay.is_removed(word)
    }
}
