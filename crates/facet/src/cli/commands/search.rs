//! Implements `facet search`.

use std::process::ExitCode;

use facet_index::CatalogHit;
use facet_nav::ProductHit;

use crate::cli::{args::SearchCommand, context::CommandContext, output::output_search};

/// Compiles the request, runs the product query, then lists the SKUs of the hits.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let nav = &cmd.navigation;
    let session = match ctx.session(&nav.catalog) {
        Ok(session) => session,
        Err(code) => return code,
    };
    let context = match session.compile(nav) {
        Ok(context) => context,
        Err(code) => return code,
    };

    let products = match session.index.search_products(&context, cmd.limit) {
        Ok(hits) => hits,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let pinned: Vec<ProductHit> = products.iter().map(CatalogHit::product_hit).collect();
    let variants = session.compiler.snowball_variant(&context, &pinned);
    let skus = if pinned.is_empty() {
        Vec::new()
    } else {
        match session.index.search_skus(&variants, cmd.limit) {
            Ok(hits) => hits,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    output_search(&context, &products, &skus, nav.json)
}
