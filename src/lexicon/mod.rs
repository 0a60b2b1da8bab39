//! Lexical lithology classification.
//!
//! Descriptions are normalized and tokenized by [`crate::text`]; this module
//! maps the resulting tokens onto a closed lithology vocabulary:
//!
//! - [`LexiconDict`] / [`AdjectiveLexiconDict`] map surface tokens to classes
//! - [`find_primary_lithology`] / [`find_secondary_lithology`] do the lookup
//! - [`LithologyVocabulary`] numbers the classes for spatial interpolation
//! - [`DescriptionClassifier`] runs the whole chain over bore-log tables

mod dict;
mod markers;
mod matcher;
mod pipeline;
mod vocabulary;

pub use dict::{AdjectiveLexiconDict, Lexicon, LexiconDict, DEFAULT_LITHOLOGIES};
pub use markers::{
    find_litho_markers, find_litho_markers_all, find_word_from_root, token_frequencies,
    TokenFrequency, DEFAULT_ANY_LITHO_MARKERS_RE,
};
pub use matcher::{
    find_primary_lithologies, find_primary_lithology, find_secondary_lithologies,
    find_secondary_lithology,
};
pub use pipeline::{Classification, DescriptionClassifier};
pub use vocabulary::{LithologyVocabulary, INTERPOLATION_LITHOLOGIES};
