// Morphology: affix chains, expansion, reduction and analysis output

pub mod analysis;
pub mod chain;
pub mod expand;
pub mod reduce;

pub use analysis::{analyze, describe, stem};
pub use chain::AffixChain;
pub use expand::{Expanded, Expansion, expand};
pub use reduce::{Reduction, reduce};
