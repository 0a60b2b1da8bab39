//! Text processing for bore-log descriptions: abbreviation expansion,
//! normalization, composite-term splitting and tokenization.

mod abbreviation;
mod normalizer;
mod tokenizer;

pub use abbreviation::{AbbreviationExpander, AbbreviationMap, NoExpansion};
pub use normalizer::{remove_punctuation, split_composite_term, split_with_term, Normalizer};
pub use tokenizer::{UnicodeTokenizer, WordTokenizer};
