//! Spell checking engine over an affix table and a dictionary store.
//!
//! # Architecture
//!
//! - [`lookup`] -- Word lookup seam shared by the store and the runtime overlay
//! - [`overlay`] -- Words added or removed at runtime
//! - [`morphology`] -- Affix chains: expansion, reduction and analysis output
//! - [`speller`] -- Dictionary, compound and pipeline spell checking
//! - [`suggestion`] -- Candidate generators, cost budget and strategy
//! - [`source`] -- Resolving dictionary files on disk
//! - [`handle`] -- The [`Hunspell`] handle tying everything together

pub mod handle;
pub mod lookup;
pub mod morphology;
pub mod overlay;
pub mod source;
pub mod speller;
pub mod suggestion;

pub use handle::{EngineOptions, Hunspell, HunspellError};
pub use source::{ConfigurationError, DictionarySource};
