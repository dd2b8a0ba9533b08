//! Clap argument definitions for the `facet` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use facet_nav::{FilterMap, FilterValue, Scope};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "facet")]
#[command(about = "Faceted navigation - compile and run catalogue navigation queries")]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug logging)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `facet` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a navigation request and print the committed queries
    Compile(CompileCommand),

    /// Compile a navigation request and run it against the catalog
    Search(SearchCommand),

    /// Validate configuration and diagnose issues
    Check,
}

/// Shared flags describing a navigation request.
#[derive(Args, Debug, Clone)]
pub struct NavigationArgs {
    /// Catalog file (JSON) with products, SKUs and attribute metadata
    #[arg(long)]
    pub catalog: PathBuf,

    /// Shop the request is made in
    #[arg(long, default_value_t = 1)]
    pub shop: i64,

    /// Customer-facing shop used for stock and price scoping [default: --shop]
    #[arg(long)]
    pub customer_shop: Option<i64>,

    /// Restrict to a category (can be specified multiple times)
    #[arg(long = "category")]
    pub categories: Vec<i64>,

    /// Include subcategories of the given categories
    #[arg(long)]
    pub subcategories: bool,

    /// Filter as name=value; repeating a name adds alternatives
    #[arg(short = 'f', long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl NavigationArgs {
    /// Shop scope of the request.
    pub fn scope(&self) -> Scope {
        Scope::new(self.shop, self.customer_shop.unwrap_or(self.shop))
    }

    /// Filters grouped by parameter, in first-seen order.
    pub fn filter_map(&self) -> FilterMap {
        let mut map = FilterMap::new();
        for (name, value) in &self.filters {
            map.entry(name.clone())
                .or_default()
                .push(FilterValue::from(value.as_str()));
        }
        map
    }
}

/// Arguments for `facet compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    #[command(flatten)]
    /// Navigation request.
    pub navigation: NavigationArgs,
}

/// Arguments for `facet search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    #[command(flatten)]
    /// Navigation request.
    pub navigation: NavigationArgs,

    /// Maximum products (and SKUs) to return
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
}

/// Parses a `name=value` filter.
fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing filter name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
