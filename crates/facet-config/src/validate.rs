//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// Stemmer languages supported by the index analyzer.
pub const SUPPORTED_STEMMERS: &[&str] = &[
    "arabic",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "norwegian",
    "portuguese",
    "romanian",
    "russian",
    "spanish",
    "swedish",
    "tamil",
    "turkish",
];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `min_word_length = 0` keeps every fragment of keyword input.
    MinWordLengthZero,
    /// The new-arrival tag is blank, so no tag value triggers the date substitution.
    EmptyNewArrivalTag,
    /// A relaxed parameter name is blank.
    BlankRelaxedParameter,
    /// The configured stemmer is not supported.
    UnsupportedStemmer {
        /// Configured stemmer name.
        name: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinWordLengthZero => {
                write!(f, "keyword.min_word_length is 0; every fragment will be searched")
            }
            Self::EmptyNewArrivalTag => write!(f, "navigation.new_arrival_tag is empty"),
            Self::BlankRelaxedParameter => {
                write!(f, "navigation.relaxed_parameters contains a blank name")
            }
            Self::UnsupportedStemmer { name } => {
                write!(f, "unsupported stemmer language: {name}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.keyword.min_word_length == 0 {
        warnings.push(ConfigWarning::MinWordLengthZero);
    }
    if config.navigation.new_arrival_tag.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyNewArrivalTag);
    }
    if config
        .navigation
        .relaxed_parameters
        .iter()
        .any(|p| p.trim().is_empty())
    {
        warnings.push(ConfigWarning::BlankRelaxedParameter);
    }
    let stemmer = config.index.stemmer.to_lowercase();
    if !SUPPORTED_STEMMERS.contains(&stemmer.as_str()) {
        warnings.push(ConfigWarning::UnsupportedStemmer {
            name: config.index.stemmer.clone(),
        });
    }

    warnings
}
