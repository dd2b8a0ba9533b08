//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use facet_index::CatalogHit;
use facet_nav::NavigationContext;
use facet_query::QueryNode;
use serde::Serialize;

/// One active filter parameter.
#[derive(Serialize)]
struct JsonFilter {
    /// Parameter name.
    name: String,
    /// Values that produced a clause.
    values: Vec<String>,
}

/// A scored document.
#[derive(Serialize)]
struct JsonHit {
    /// Product or SKU id.
    id: i64,
    /// Owning product.
    product_id: Option<i64>,
    /// Stored name.
    name: Option<String>,
    /// Relevance score.
    score: f32,
}

impl From<&CatalogHit> for JsonHit {
    fn from(hit: &CatalogHit) -> Self {
        Self {
            id: hit.id,
            product_id: hit.product_id,
            name: hit.name.clone(),
            score: hit.score,
        }
    }
}

/// JSON output for `facet compile`.
#[derive(Serialize)]
struct JsonCompileOutput {
    /// Whether the relaxed tier was committed.
    relaxed: bool,
    /// Active filters.
    filters: Vec<JsonFilter>,
    /// Committed product query.
    product_query: Option<String>,
    /// Committed SKU query.
    sku_query: Option<String>,
}

/// JSON output for `facet search`.
#[derive(Serialize)]
struct JsonSearchOutput {
    /// Compiled request.
    #[serde(flatten)]
    compiled: JsonCompileOutput,
    /// Product hits, best first.
    products: Vec<JsonHit>,
    /// SKU hits of the returned products, best first.
    skus: Vec<JsonHit>,
}

/// Renders an optional query; an absent query matches everything.
pub fn render_query(query: Option<&QueryNode>) -> String {
    query.map_or_else(|| "*".to_string(), QueryNode::to_query_string)
}

/// Converts a compiled context for JSON output.
fn compiled(context: &NavigationContext) -> JsonCompileOutput {
    JsonCompileOutput {
        relaxed: context.is_relaxed(),
        filters: context
            .filter_parameters()
            .iter()
            .map(|(name, values)| JsonFilter {
                name: name.clone(),
                values: values.clone(),
            })
            .collect(),
        product_query: context.product_query().map(QueryNode::to_query_string),
        sku_query: context.sku_query().map(QueryNode::to_query_string),
    }
}

/// Prints a value as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Outputs a compiled navigation context.
pub fn output_context(context: &NavigationContext, json: bool) -> ExitCode {
    if json {
        return print_json(&compiled(context));
    }
    print_context(context);
    ExitCode::SUCCESS
}

/// Outputs a compiled context with its product and SKU hits.
pub fn output_search(
    context: &NavigationContext,
    products: &[CatalogHit],
    skus: &[CatalogHit],
    json: bool,
) -> ExitCode {
    if json {
        return print_json(&JsonSearchOutput {
            compiled: compiled(context),
            products: products.iter().map(JsonHit::from).collect(),
            skus: skus.iter().map(JsonHit::from).collect(),
        });
    }

    print_context(context);
    println!();
    println!("Products ({}):", products.len());
    if products.is_empty() {
        println!("  (none)");
        return ExitCode::SUCCESS;
    }
    println!("{}", hits_table(products, false));
    println!();
    println!("SKUs ({}):", skus.len());
    if skus.is_empty() {
        println!("  (none)");
    } else {
        println!("{}", hits_table(skus, true));
    }
    ExitCode::SUCCESS
}

/// Prints filters and committed queries.
fn print_context(context: &NavigationContext) {
    println!("Filters:");
    if context.filter_parameters().is_empty() {
        println!("  (none)");
    }
    for (name, values) in context.filter_parameters() {
        println!("  {name} = {}", values.join(" | "));
    }
    println!();
    println!("Product query:");
    println!("  {}", render_query(context.product_query()));
    println!("SKU query:");
    println!("  {}", render_query(context.sku_query()));
    println!();
    let tier = if context.is_relaxed() {
        "relaxed (strict query matched nothing)"
    } else {
        "strict"
    };
    println!("Tier: {tier}");
}

/// Builds a result table.
fn hits_table(hits: &[CatalogHit], with_product: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    if with_product {
        table.set_header(vec!["#", "SKU", "Product", "Name", "Score"]);
    } else {
        table.set_header(vec!["#", "Product", "Name", "Score"]);
    }
    for (rank, hit) in hits.iter().enumerate() {
        let mut row = vec![Cell::new(rank + 1), Cell::new(hit.id)];
        if with_product {
            row.push(Cell::new(
                hit.product_id.map_or_else(String::new, |id| id.to_string()),
            ));
        }
        row.push(Cell::new(hit.name.as_deref().unwrap_or("")));
        row.push(Cell::new(format!("{:.2}", hit.score)));
        table.add_row(row);
    }
    table
}
