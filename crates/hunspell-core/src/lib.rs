//! Leaf types shared by the dictionary parser, the engine and its front ends.

pub mod case;
pub mod character;
pub mod encoding;
pub mod enums;
pub mod morph;
