//! Free-text keyword search.
//!
//! The strict form matches the whole phrase across the catalogue's text fields and, when
//! the phrase splits into several words, additionally requires every word to match
//! somewhere. The relaxed form drops the phrase and lets any word match, including
//! against stemmed fields.
//!
//! Fuzzy matches allow two edits, or one edit for terms shorter than
//! [`SHORT_TERM_CHARS`] characters.

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::{FilterValue, fields};

/// Terms shorter than this many characters allow at most one edit.
pub const SHORT_TERM_CHARS: usize = 5;

/// How a keyword field is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    /// Exact token.
    Exact,
    /// Token within the given edit distance.
    Fuzzy(u8),
}

/// A field searched by the keyword builder.
#[derive(Debug, Clone, Copy)]
struct Weighted {
    /// Field name.
    field: &'static str,
    /// Match mode.
    matching: Match,
    /// Score multiplier.
    boost: f32,
}

/// Shorthand for an exact field entry.
const fn exact(field: &'static str, boost: f32) -> Weighted {
    Weighted {
        field,
        matching: Match::Exact,
        boost,
    }
}

/// Shorthand for a fuzzy field entry.
const fn fuzzy(field: &'static str, edits: u8, boost: f32) -> Weighted {
    Weighted {
        field,
        matching: Match::Fuzzy(edits),
        boost,
    }
}

/// Fields matched against the whole phrase.
const PHRASE_FIELDS: &[Weighted] = &[
    fuzzy(fields::NAME, 1, 4.0),
    fuzzy(fields::DISPLAY_NAME, 2, 4.0),
    exact(fields::BRAND, 5.0),
    fuzzy(fields::CATEGORY_NAME, 2, 4.5),
    fuzzy(fields::TYPE, 2, 4.5),
    exact(fields::CODE, 10.0),
    exact(fields::MANUFACTURER_CODE, 10.0),
    exact(fields::SKU_CODE, 10.0),
    exact(fields::SKU_MANUFACTURER_CODE, 10.0),
    fuzzy(fields::ATTRIBUTE_SEARCH_PRIMARY, 2, 10.0),
    fuzzy(fields::ATTRIBUTE_SEARCH_PHRASE, 2, 3.5),
];

/// Fields matched against each word in the strict form.
const WORD_FIELDS: &[Weighted] = &[
    fuzzy(fields::NAME, 2, 3.0),
    fuzzy(fields::DISPLAY_NAME, 2, 3.0),
    exact(fields::BRAND, 5.0),
    fuzzy(fields::CATEGORY_NAME_STEM, 2, 2.5),
    exact(fields::CODE, 4.0),
    exact(fields::MANUFACTURER_CODE, 4.0),
    exact(fields::SKU_CODE, 4.0),
    exact(fields::SKU_MANUFACTURER_CODE, 4.0),
    fuzzy(fields::ATTRIBUTE_SEARCH_PRIMARY, 2, 4.0),
    fuzzy(fields::ATTRIBUTE_SEARCH_PHRASE, 2, 2.0),
];

/// Fields matched against each word in the relaxed form.
const RELAXED_FIELDS: &[Weighted] = &[
    fuzzy(fields::NAME, 2, 3.0),
    fuzzy(fields::NAME_STEM, 2, 2.5),
    fuzzy(fields::DISPLAY_NAME, 2, 3.0),
    fuzzy(fields::DISPLAY_NAME_STEM, 2, 2.5),
    fuzzy(fields::BRAND, 2, 3.5),
    fuzzy(fields::CATEGORY_NAME, 2, 3.5),
    fuzzy(fields::CATEGORY_NAME_STEM, 2, 2.0),
    fuzzy(fields::TYPE, 2, 3.5),
    fuzzy(fields::TYPE_STEM, 2, 2.0),
    fuzzy(fields::CODE, 2, 4.0),
    fuzzy(fields::MANUFACTURER_CODE, 2, 4.0),
    fuzzy(fields::SKU_CODE, 2, 4.0),
    fuzzy(fields::SKU_MANUFACTURER_CODE, 2, 4.0),
    fuzzy(fields::CODE_STEM, 2, 1.0),
    fuzzy(fields::MANUFACTURER_CODE_STEM, 2, 1.0),
    fuzzy(fields::SKU_CODE_STEM, 2, 1.0),
    fuzzy(fields::SKU_MANUFACTURER_CODE_STEM, 2, 1.0),
    fuzzy(fields::ATTRIBUTE_SEARCH_PRIMARY, 2, 2.75),
    fuzzy(fields::ATTRIBUTE_SEARCH, 2, 2.75),
];

/// Keyword search across names, codes, categories and searchable attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBuilder {
    /// Words shorter than this are ignored.
    min_word_length: usize,
}

impl KeywordBuilder {
    /// Creates a builder ignoring words shorter than `min_word_length` characters.
    pub fn new(min_word_length: usize) -> Self {
        Self { min_word_length }
    }

    /// Strict query for one search phrase.
    ///
    /// A phrase with no searchable words builds nothing.
    fn strict_phrase(&self, raw: &str) -> Option<QueryNode> {
        let words = split_for_search(raw, self.min_word_length);
        if words.is_empty() {
            return None;
        }
        let phrase = raw.trim().to_lowercase();

        let mut parts = Vec::with_capacity(2);
        parts.extend(QueryNode::any(field_matches(PHRASE_FIELDS, &phrase)));

        // A lone word still gets its own clause when it differs from the raw input.
        let needs_words = words.len() > 1 || words[0] != raw;
        if needs_words {
            let per_word = words
                .iter()
                .filter_map(|word| {
                    QueryNode::any(field_matches(WORD_FIELDS, &word.to_lowercase()))
                })
                .collect();
            parts.extend(QueryNode::all(per_word));
        }
        QueryNode::any(parts)
    }

    /// Relaxed query for one search phrase.
    fn relaxed_phrase(&self, raw: &str) -> Option<QueryNode> {
        let per_word = split_for_search(raw.trim(), self.min_word_length)
            .iter()
            .filter_map(|word| {
                QueryNode::any(field_matches(RELAXED_FIELDS, &word.to_lowercase()))
            })
            .collect();
        QueryNode::any(per_word)
    }
}

impl Default for KeywordBuilder {
    fn default() -> Self {
        Self::new(2)
    }
}

impl SearchQueryBuilder for KeywordBuilder {
    fn strict(&self, _scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| self.strict_phrase(&item.to_text()))
    }

    fn relaxed(&self, _scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| self.relaxed_phrase(&item.to_text()))
    }
}

/// Splits text into search words on non-alphanumeric characters, dropping words shorter
/// than `min_length` characters. Case is preserved.
pub fn split_for_search(text: &str, min_length: usize) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && word.chars().count() >= min_length)
        .map(str::to_string)
        .collect()
}

/// One boosted match per field for `text`.
fn field_matches(table: &[Weighted], text: &str) -> Vec<QueryNode> {
    table
        .iter()
        .map(|entry| {
            let node = match entry.matching {
                Match::Exact => QueryNode::term(entry.field, text),
                Match::Fuzzy(edits) => {
                    QueryNode::fuzzy(entry.field, text, edit_limit(text, edits))
                }
            };
            node.boosted(entry.boost)
        })
        .collect()
}

/// Caps the edit distance for short terms.
fn edit_limit(text: &str, requested: u8) -> u8 {
    if text.chars().count() < SHORT_TERM_CHARS {
        requested.min(1)
    } else {
        requested
    }
}
