//! Configuration file parsing.
//!
//! Parses individual `.facet.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Keyword builder settings.
    pub keyword: Option<RawKeywordSettings>,
    /// Navigation compiler settings.
    pub navigation: Option<RawNavigationSettings>,
    /// Backing index settings.
    pub index: Option<RawIndexSettings>,
}

/// Raw keyword settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawKeywordSettings {
    /// Words shorter than this are dropped from keyword input.
    pub min_word_length: Option<usize>,
}

/// Raw navigation settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNavigationSettings {
    /// Parameters whose relaxed builder is used when the strict query finds nothing.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub relaxed_parameters: Option<Vec<String>>,
    /// Tag value that stands for "new arrivals".
    pub new_arrival_tag: Option<String>,
    /// Window used when no explicit new-arrival cutoff is known.
    pub new_arrival_days: Option<u32>,
    /// Restrict navigation to products in stock.
    pub enforce_in_stock: Option<bool>,
    /// Restrict navigation to products with a price.
    pub enforce_has_price: Option<bool>,
}

/// Raw index settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Stemming language for `_stem` fields.
    pub stemmer: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
