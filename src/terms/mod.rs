//! Medical terminology: the term table and the translator built on it

pub mod map;
pub mod table;
pub mod translator;

pub use map::{TermEntry, TermMap};
pub use translator::{TermMatch, TermTranslator};
