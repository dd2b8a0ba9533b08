//! Text analysis for catalogue fields.
//!
//! Three analyzers are registered on every catalogue index:
//! - [`TEXT_TOKENIZER`]: splits on whitespace and punctuation, lowercases, drops tokens
//!   longer than 40 bytes
//! - [`STEM_TOKENIZER`]: the text pipeline followed by a language stemmer
//! - [`KEYWORD_TOKENIZER`]: the whole value as one lowercased token
//!
//! The stemmer language is configurable via the `stemmer` setting in `.facet.toml`.

use tantivy::{
    Index,
    tokenizer::{
        Language, LowerCaser, RawTokenizer, RemoveLongFilter, SimpleTokenizer, Stemmer,
        TextAnalyzer,
    },
};

use crate::IndexError;

/// Tokenizer for analysed text fields.
pub const TEXT_TOKENIZER: &str = "facet_text";

/// Tokenizer for stemmed text fields.
pub const STEM_TOKENIZER: &str = "facet_stem";

/// Tokenizer for keyword fields.
pub const KEYWORD_TOKENIZER: &str = "facet_keyword";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Parses a stemmer language string into a Tantivy `Language`.
pub fn parse_language(name: &str) -> Result<Language, IndexError> {
    match name.to_lowercase().as_str() {
        "arabic" => Ok(Language::Arabic),
        "danish" => Ok(Language::Danish),
        "dutch" => Ok(Language::Dutch),
        "english" => Ok(Language::English),
        "finnish" => Ok(Language::Finnish),
        "french" => Ok(Language::French),
        "german" => Ok(Language::German),
        "greek" => Ok(Language::Greek),
        "hungarian" => Ok(Language::Hungarian),
        "italian" => Ok(Language::Italian),
        "norwegian" => Ok(Language::Norwegian),
        "portuguese" => Ok(Language::Portuguese),
        "romanian" => Ok(Language::Romanian),
        "russian" => Ok(Language::Russian),
        "spanish" => Ok(Language::Spanish),
        "swedish" => Ok(Language::Swedish),
        "tamil" => Ok(Language::Tamil),
        "turkish" => Ok(Language::Turkish),
        other => Err(IndexError::InvalidLanguage(other.to_string())),
    }
}

/// Builds the analysed text pipeline.
pub fn text_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Builds the stemmed text pipeline.
pub fn stem_analyzer(language: Language) -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(Stemmer::new(language))
        .build()
}

/// Builds the keyword pipeline.
pub fn keyword_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(RawTokenizer::default())
        .filter(LowerCaser)
        .build()
}

/// Registers all catalogue analyzers on an index.
pub fn register_analyzers(index: &Index, stemmer: &str) -> Result<(), IndexError> {
    let language = parse_language(stemmer)?;
    let tokenizers = index.tokenizers();
    tokenizers.register(TEXT_TOKENIZER, text_analyzer());
    tokenizers.register(STEM_TOKENIZER, stem_analyzer(language));
    tokenizers.register(KEYWORD_TOKENIZER, keyword_analyzer());
    Ok(())
}

#[cfg(test)]
mod test {
    use std::iter;

    use facet_config::SUPPORTED_STEMMERS;

    use super::*;

    fn tokens(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
        let mut stream = analyzer.token_stream(text);
        iter::from_fn(|| stream.next().map(|t| t.text.clone())).collect()
    }

    #[test]
    fn parses_every_configurable_stemmer() {
        for name in SUPPORTED_STEMMERS {
            assert!(parse_language(name).is_ok(), "failed to parse {name}");
        }
        assert_eq!(parse_language("GeRmAn").unwrap(), Language::German);
    }

    #[test]
    fn rejects_unknown_language() {
        let err = parse_language("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn text_lowercases_and_splits() {
        assert_eq!(
            tokens(&mut text_analyzer(), "Running SHOES, t-shirt"),
            vec!["running", "shoes", "t", "shirt"]
        );
    }

    #[test]
    fn stem_reduces_words() {
        assert_eq!(
            tokens(&mut stem_analyzer(Language::English), "Running shoes"),
            vec!["run", "shoe"]
        );
    }

    #[test]
    fn keyword_keeps_whole_value() {
        assert_eq!(
            tokens(&mut keyword_analyzer(), "New Balance"),
            vec!["new balance"]
        );
    }

    #[test]
    fn text_drops_long_tokens() {
        let long_token = "a".repeat(50);
        assert_eq!(
            tokens(&mut text_analyzer(), &format!("short {long_token} word")),
            vec!["short", "word"]
        );
    }
}
