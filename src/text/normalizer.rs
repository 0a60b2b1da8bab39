//! Description normalization ahead of tokenization.

use crate::config::TextConfig;
use crate::error::Result;
use crate::text::AbbreviationExpander;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WITH_TERM: Lazy<Regex> = Lazy::new(|| composite_regex("with").unwrap());

fn composite_regex(joiner: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!("([a-z]+)({})([a-z]+)", joiner))
}

/// Splits `<word><joiner><word>` into three space separated words.
///
/// `joiner` is a regex fragment; the words on either side are lowercase ASCII
/// letters, so lowercase the text first.
pub fn split_composite_term(text: &str, joiner: &str) -> Result<String> {
    let re = composite_regex(joiner)?;
    Ok(re.replace_all(text, "${1} ${2} ${3}").into_owned())
}

/// Splits composite terms joined by "with", e.g. "sandwithclay".
pub fn split_with_term(text: &str) -> String {
    WITH_TERM.replace_all(text, "${1} ${2} ${3}").into_owned()
}

/// Removes ASCII punctuation characters.
pub fn remove_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Description normalizer.
///
/// Applies, in order: abbreviation expansion, optional Unicode normalization,
/// lowercasing and composite-term splitting. One output per input; nothing
/// is ever dropped.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: TextConfig,
    composite: Option<Regex>,
}

impl Normalizer {
    /// Creates a new normalizer with the given configuration.
    ///
    /// Fails if the composite joiner is not a valid regex fragment.
    pub fn new(config: TextConfig) -> Result<Self> {
        let composite = if config.split_composites {
            Some(composite_regex(&config.composite_joiner)?)
        } else {
            None
        };
        Ok(Self { config, composite })
    }

    /// Creates a normalizer with default configuration.
    pub fn default_config() -> Self {
        Self {
            config: TextConfig::default(),
            composite: Some(WITH_TERM.clone()),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Normalizes a single description.
    pub fn normalize<E>(&self, description: &str, expander: &E) -> String
    where
        E: AbbreviationExpander + ?Sized,
    {
        let mut result = expander.expand_abbreviations(description);

        if self.config.unicode_normalize {
            result = result.nfc().collect();
        }

        if self.config.lowercase {
            result = result.to_lowercase();
        }

        self.split_composites(&result)
    }

    /// Normalizes descriptions elementwise, preserving order and count.
    pub fn normalize_all<S, E>(&self, descriptions: &[S], expander: &E) -> Vec<String>
    where
        S: AsRef<str> + Sync,
        E: AbbreviationExpander + ?Sized,
    {
        descriptions
            .par_iter()
            .map(|d| self.normalize(d.as_ref(), expander))
            .collect()
    }

    /// Applies only the composite-term split.
    pub fn split_composites(&self, text: &str) -> String {
        match &self.composite {
            Some(re) => re.replace_all(text, "${1} ${2} ${3}").into_owned(),
            None => text.to_string(),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::default_config()
    }
}
