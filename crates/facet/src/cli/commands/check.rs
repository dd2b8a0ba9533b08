//! Implements `facet check`.

use std::process::ExitCode;

use facet_config::{ConfigWarning, discover_config_files};

use crate::cli::context::CommandContext;

/// Validates the configuration and reports warnings.
///
/// Warnings do not fail the check; an unreadable configuration fails before this runs.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found; using defaults.");
    } else {
        println!("Config files:");
        for path in &config_files {
            println!("  {}", path.display());
        }
    }
    println!();

    match ctx.config.settings_to_toml() {
        Ok(settings) => {
            println!("Effective settings:");
            print!("{settings}");
            println!();
        }
        Err(e) => {
            eprintln!("error: failed to render settings: {e}");
            return ExitCode::FAILURE;
        }
    }

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();
    print_hints(&warnings);
    ExitCode::SUCCESS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::MinWordLengthZero => {
                "Set keyword.min_word_length to 2 or more to skip stray letters."
            }
            ConfigWarning::EmptyNewArrivalTag => {
                "Set navigation.new_arrival_tag to the tag value shoppers use for new items."
            }
            ConfigWarning::BlankRelaxedParameter => {
                "Remove empty entries from navigation.relaxed_parameters."
            }
            ConfigWarning::UnsupportedStemmer { .. } => {
                "Use one of the stemmer languages listed in the documentation, e.g. \"english\"."
            }
        })
        .collect();
    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
