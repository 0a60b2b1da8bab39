//! Primary and secondary lithology lookup.
//!
//! Both lookups walk the tokens in text order and stop at the first hit, so
//! the position of a word in the description decides, never the iteration
//! order of a lexicon.

use crate::error::{BoreSliceError, Result};
use crate::lexicon::{AdjectiveLexiconDict, Lexicon, LexiconDict};
use rayon::prelude::*;

/// Class of the first token that is a key of `lexicon` and whose class is not
/// `exclude`.
fn first_match<'a, S: AsRef<str>>(
    tokens: &[S],
    lexicon: &'a Lexicon,
    exclude: Option<&str>,
) -> Option<&'a str> {
    tokens
        .iter()
        .filter_map(|t| lexicon.get(t.as_ref()))
        .find(|class| Some(*class) != exclude)
}

/// Finds the primary lithology of a tokenized description.
///
/// Returns the class of the first token found in `lithologies`, or an empty
/// string when no token matches.
pub fn find_primary_lithology<S: AsRef<str>>(tokens: &[S], lithologies: &LexiconDict) -> String {
    first_match(tokens, lithologies, None)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Finds the secondary lithology of a tokenized description.
///
/// Adjectival markers ("sandy") are tried first, then the looser noun
/// lexicon. In both passes the first token whose class differs from
/// `primary` wins. No secondary lithology exists without a primary one, so an
/// empty `primary` always yields an empty string.
pub fn find_secondary_lithology<S: AsRef<str>>(
    tokens: &[S],
    primary: &str,
    adjectives: &AdjectiveLexiconDict,
    lithologies: &LexiconDict,
) -> String {
    if primary.is_empty() {
        return String::new();
    }
    first_match(tokens, adjectives, Some(primary))
        .or_else(|| first_match(tokens, lithologies, Some(primary)))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Batch form of [`find_primary_lithology`].
pub fn find_primary_lithologies<S>(tokens: &[Vec<S>], lithologies: &LexiconDict) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    tokens
        .par_iter()
        .map(|t| find_primary_lithology(t, lithologies))
        .collect()
}

/// Batch form of [`find_secondary_lithology`].
///
/// `tokens` and `primaries` are parallel sequences and must have the same
/// length.
pub fn find_secondary_lithologies<S, P>(
    tokens: &[Vec<S>],
    primaries: &[P],
    adjectives: &AdjectiveLexiconDict,
    lithologies: &LexiconDict,
) -> Result<Vec<String>>
where
    S: AsRef<str> + Sync,
    P: AsRef<str> + Sync,
{
    if tokens.len() != primaries.len() {
        return Err(BoreSliceError::Validation(format!(
            "tokenized descriptions ({}) and primary lithologies ({}) must have the same length",
            tokens.len(),
            primaries.len()
        )));
    }

    Ok(tokens
        .par_iter()
        .zip(primaries.par_iter())
        .map(|(t, p)| find_secondary_lithology(t, p.as_ref(), adjectives, lithologies))
        .collect())
}
