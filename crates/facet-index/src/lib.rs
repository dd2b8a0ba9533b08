//! Tantivy-backed catalogue index for faceted navigation.
//!
//! This crate evaluates the queries compiled by `facet-nav`:
//! - Catalogue files with product and SKU documents, attribute metadata and new-arrival
//!   cutoffs ([`CatalogFile`], [`StaticCatalog`])
//! - Product and SKU schemas with per-scope fields discovered from the documents
//! - Lowering of [`facet_query::QueryNode`] trees into Tantivy queries
//! - Counting for the compiler's zero-result probe, and search with boost fields added
//!   to the score
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use facet_config::Config;
//! use facet_index::{CatalogFile, CatalogIndex, StaticCatalog};
//! use facet_nav::{FilterMap, NavigationCompiler, Scope};
//!
//! let catalog = CatalogFile::parse(
//!     r#"{ "products": [{ "productId": 1, "name": "Trail shoe", "shopId": 10,
//!          "shopHasPrice": 10, "shopInStockFlag1": 10 }] }"#,
//! )
//! .unwrap();
//! let index = Arc::new(CatalogIndex::build(&catalog, "english").unwrap());
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let meta = Arc::new(StaticCatalog::new(&catalog, 90, today));
//! let compiler =
//!     NavigationCompiler::from_config(&Config::default(), meta.clone(), meta, index.clone());
//!
//! let context = compiler
//!     .compile_navigation(Scope::new(10, 10), &[], false, &FilterMap::new())
//!     .unwrap();
//! let hits = index.search_products(&context, 10).unwrap();
//! assert_eq!(hits[0].id, 1);
//! ```

#![warn(missing_docs)]

mod analyzer;
mod catalog;
mod compile;
mod error;
mod index;
mod schema;
mod search;
mod writer;

pub use analyzer::{
    KEYWORD_TOKENIZER, STEM_TOKENIZER, TEXT_TOKENIZER, parse_language, register_analyzers,
};
pub use catalog::{AttributeDef, CatalogFile, Document, StaticCatalog, field_names};
pub use compile::{QueryCompiler, boost_fields};
pub use error::IndexError;
pub use index::CatalogIndex;
pub use schema::{CatalogSchema, FieldKind, IndexKind, classify_dynamic};
pub use search::{CatalogHit, IndexPart};
pub use writer::{CatalogWriter, build_part};
