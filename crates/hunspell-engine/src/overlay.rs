// Runtime word additions and removals layered over the loaded store
//
// The store itself is never mutated. Queries take the read lock for the
// whole check so a concurrent mutation is seen either completely or not at
// all.

use hashbrown::{HashMap, HashSet};
use hunspell_core::enums::{MAX_WORD_CHARS, OverlayStatus};
use hunspell_dict::{DictionaryEntry, DictionaryStore};
use log::debug;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::lookup::{LayeredLookup, WordLookup};

/// Words added and removed since the dictionary was loaded.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    added: HashMap<String, DictionaryEntry>,
    removed: HashSet<String>,
}

impl OverlayState {
    pub fn added(&self, word: &str) -> Option<&DictionaryEntry> {
        self.added.get(word)
    }

    pub fn is_removed(&self, word: &str) -> bool {
        self.removed.contains(word)
    }

    pub fn insert_added(&mut self, entry: DictionaryEntry) {
        self.removed.remove(&entry.word);
        self.added.insert(entry.word.clone(), entry);
    }

    pub fn insert_removed(&mut self, word: &str) {
        self.added.remove(word);
        self.removed.insert(word.to_string());
    }

    /// Decision the overlay makes on its own: `Some(false)` for a removed
    /// word, `Some(true)` for an added one, `None` when the dictionary
    /// has to decide.
    pub fn verdict(&self, word: &str) -> Option<bool> {
        if self.removed.contains(word) {
            Some(false)
        } else if self.added.contains_key(word) {
            Some(true)
        } else {
            None
        }
    }

    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn is_storable(word: &str) -> bool {
    !word.is_empty() && word.chars().count() <= MAX_WORD_CHARS
}

/// Thread-safe runtime overlay.
#[derive(Debug, Default)]
pub struct RuntimeOverlay {
    state: RwLock<OverlayState>,
}

impl RuntimeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the overlay for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, OverlayState> {
        self.state.read()
    }

    /// Accept `word` as written, without affixes.
    ///
    /// A removed word is restored. A word already in the store or already
    /// added is reported as a duplicate.
    pub fn add(&self, store: &DictionaryStore, word: &str) -> OverlayStatus {
        if !is_storable(word) {
            return OverlayStatus::InvalidWord;
        }
        let mut state = self.state.write();
        let was_removed = state.removed.remove(word);
        if state.added.contains_key(word) || store.contains(word) {
            return if was_removed {
                debug!("overlay: restored {word:?}");
                OverlayStatus::Added
            } else {
                OverlayStatus::Duplicate
            };
        }
        state
            .added
            .insert(word.to_string(), DictionaryEntry::new(word));
        debug!("overlay: added {word:?}");
        OverlayStatus::Added
    }

    /// Accept `word` with the flags of `exemplar`, so that it inflects the
    /// same way.
    pub fn add_with_affix(
        &self,
        store: &DictionaryStore,
        word: &str,
        exemplar: &str,
    ) -> OverlayStatus {
        if !is_storable(word) {
            return OverlayStatus::InvalidWord;
        }
        let mut state = self.state.write();
        let was_removed = state.removed.contains(word);
        if !was_removed && (state.added.contains_key(word) || store.contains(word)) {
            return OverlayStatus::Duplicate;
        }
        let flags = match LayeredLookup::new(store, &state).lookup(exemplar) {
            Some(entry) => entry.flags.clone(),
            None => return OverlayStatus::ExemplarNotFound,
        };
        state.insert_added(DictionaryEntry::with_flags(word, flags));
        debug!("overlay: added {word:?} like {exemplar:?}");
        OverlayStatus::Added
    }

    /// Reject `word` from now on.
    ///
    /// `resolve` runs under the write lock. It returns the spelling to
    /// store as removed when the word is currently accepted, `None` when
    /// it is not, which is reported as not found.
    pub fn remove<F>(&self, store: &DictionaryStore, word: &str, resolve: F) -> OverlayStatus
    where
        F: FnOnce(&OverlayState, &LayeredLookup<'_>) -> Option<String>,
    {
        if !is_storable(word) {
            return OverlayStatus::InvalidWord;
        }
        let mut state = self.state.write();
        if state.removed.contains(word) {
            return OverlayStatus::NotFound;
        }
        let target = if state.added.contains_key(word) {
            Some(word.to_string())
        } else {
            resolve(&state, &LayeredLookup::new(store, &state))
        };
        let Some(target) = target else {
            return OverlayStatus::NotFound;
        };
        state.insert_removed(&target);
        debug!("overlay: removed {target:?}");
        OverlayStatus::Removed
    }

    /// Drop every runtime change.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.added.clear();
        state.removed.clear();
    }
}
