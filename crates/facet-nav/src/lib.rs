//! Faceted navigation query compiler.
//!
//! Compiles a navigation request, made of a shop scope, optional categories and a map of
//! filter parameters, into a [`NavigationContext`] carrying a product query and a SKU
//! query in the [`facet_query`] algebra. When the strict query matches no products the
//! compiler falls back to a relaxed query so the shopper still sees results.
//!
//! # Example
//!
//! ```
//! use std::{collections::HashSet, sync::Arc};
//!
//! use chrono::NaiveDate;
//! use facet_config::Config;
//! use facet_nav::{
//!     AttributeCatalog, CategoryCatalog, FilterMap, NavigationCompiler, NavigationContext,
//!     NavigationError, ProductCounter, Scope,
//! };
//!
//! struct Catalog;
//!
//! impl AttributeCatalog for Catalog {
//!     fn filterable_attribute_codes(&self) -> Result<HashSet<String>, NavigationError> {
//!         Ok(HashSet::from(["color".to_string()]))
//!     }
//! }
//!
//! impl CategoryCatalog for Catalog {
//!     fn new_arrival_cutoff(&self, _: i64, _: i64) -> Result<NaiveDate, NavigationError> {
//!         Ok(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     }
//! }
//!
//! impl ProductCounter for Catalog {
//!     fn count_matching(&self, _: &NavigationContext) -> Result<u64, NavigationError> {
//!         Ok(12)
//!     }
//! }
//!
//! let catalog = Arc::new(Catalog);
//! let compiler = NavigationCompiler::from_config(
//!     &Config::default(),
//!     catalog.clone(),
//!     catalog.clone(),
//!     catalog,
//! );
//!
//! let mut filters = FilterMap::new();
//! filters.insert("color".into(), vec!["Red".into()]);
//! let context = compiler
//!     .compile_navigation(Scope::new(10, 10), &[], false, &filters)
//!     .unwrap();
//! assert!(context.is_filtered_by("color"));
//! assert!(!context.is_relaxed());
//! ```

#![warn(missing_docs)]

mod boost;
pub mod builder;
mod catalog;
mod compiler;
mod context;
mod error;
pub mod fields;
pub mod params;
mod registry;
mod value;

pub use boost::{PRODUCT_BOOST_FIELDS, SKU_BOOST_FIELDS, product_boost, sku_boost};
pub use builder::{FieldQueryBuilder, Scope, SearchQueryBuilder};
pub use catalog::{AttributeCatalog, CategoryCatalog, ProductCounter, ProductHit, SHOP_WIDE_CATEGORY};
pub use compiler::{CompilerOptions, FilterMap, NavigationCompiler};
pub use context::{FilterParameters, NavigationContext};
pub use error::NavigationError;
pub use registry::BuilderRegistry;
pub use value::{FilterValue, date_to_millis};
