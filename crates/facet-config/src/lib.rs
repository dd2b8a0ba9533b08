//! Configuration system for facet.
//!
//! facet uses TOML configuration files named `.facet.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.facet.toml` files found, then loading `~/.facet.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawKeywordSettings, RawNavigationSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use validate::{ConfigWarning, SUPPORTED_STEMMERS};
use validate::validate_config;

/// Top-level merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Keyword builder settings.
    pub keyword: KeywordSettings,
    /// Navigation compiler settings.
    pub navigation: NavigationSettings,
    /// Backing index settings.
    pub index: IndexSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.facet.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            keyword: self.keyword.clone(),
            navigation: self.navigation.clone(),
            index: self.index.clone(),
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Keyword builder settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordSettings {
    /// Words shorter than this are dropped from keyword input.
    pub min_word_length: usize,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self { min_word_length: 2 }
    }
}

/// Navigation compiler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Parameters whose relaxed builder is used when the strict query finds nothing.
    pub relaxed_parameters: Vec<String>,
    /// Tag value that stands for "new arrivals".
    pub new_arrival_tag: String,
    /// Window used when no explicit new-arrival cutoff is known.
    pub new_arrival_days: u32,
    /// Restrict navigation to products in stock.
    pub enforce_in_stock: bool,
    /// Restrict navigation to products with a price.
    pub enforce_has_price: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            relaxed_parameters: vec![String::from("query")],
            new_arrival_tag: String::from("newarrival"),
            new_arrival_days: 90,
            enforce_in_stock: true,
            enforce_has_price: true,
        }
    }
}

/// Backing index settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Stemming language for `_stem` fields.
    pub stemmer: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Keyword builder settings.
    keyword: KeywordSettings,
    /// Navigation compiler settings.
    navigation: NavigationSettings,
    /// Backing index settings.
    index: IndexSettings,
}
