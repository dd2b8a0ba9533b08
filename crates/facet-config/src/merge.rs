//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use crate::{
    Config, IndexSettings, KeywordSettings, NavigationSettings,
    parse::{RawConfig, RawIndexSettings, RawKeywordSettings, RawNavigationSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config). For every setting the
/// first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref keyword) = parsed.config.keyword {
            apply_raw_keyword(&mut config.keyword, keyword);
        }
        if let Some(ref navigation) = parsed.config.navigation {
            apply_raw_navigation(&mut config.navigation, navigation);
        }
        if let Some(ref index) = parsed.config.index {
            apply_raw_index(&mut config.index, index);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    config
}

/// Applies raw keyword settings to result.
fn apply_raw_keyword(result: &mut KeywordSettings, raw: &RawKeywordSettings) {
    if let Some(v) = raw.min_word_length {
        result.min_word_length = v;
    }
}

/// Applies raw navigation settings to result.
fn apply_raw_navigation(result: &mut NavigationSettings, raw: &RawNavigationSettings) {
    if let Some(ref v) = raw.relaxed_parameters {
        result.relaxed_parameters = v.clone();
    }
    if let Some(ref v) = raw.new_arrival_tag {
        result.new_arrival_tag = v.clone();
    }
    if let Some(v) = raw.new_arrival_days {
        result.new_arrival_days = v;
    }
    if let Some(v) = raw.enforce_in_stock {
        result.enforce_in_stock = v;
    }
    if let Some(v) = raw.enforce_has_price {
        result.enforce_has_price = v;
    }
}

/// Applies raw index settings to result.
fn apply_raw_index(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
}
