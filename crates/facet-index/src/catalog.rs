//! Catalogue files.
//!
//! A catalogue file is a JSON document listing attribute metadata, new-arrival cutoffs
//! per category, and the product and SKU documents to index:
//!
//! ```json
//! {
//!   "attributes": [{ "code": "color" }, { "code": "internal", "filterable": false }],
//!   "new_arrivals": { "0": "2024-01-01", "101": "2024-02-01" },
//!   "products": [{ "productId": 1, "name": "Trail shoe", "facet_color": "red" }],
//!   "skus": [{ "skuId": 11, "productId": 1, "code": "TS-RED-42" }]
//! }
//! ```

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs,
    path::Path,
};

use chrono::{Days, NaiveDate};
use facet_nav::{AttributeCatalog, CategoryCatalog, NavigationError, SHOP_WIDE_CATEGORY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::IndexError;

/// A raw catalogue document: field name to value or list of values.
pub type Document = Map<String, Value>;

/// Attribute metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttributeDef {
    /// Attribute code, as used in filter parameters.
    pub code: String,
    /// Whether the attribute may be used as a navigation filter.
    #[serde(default = "default_filterable")]
    pub filterable: bool,
}

/// Attributes are filterable unless stated otherwise.
fn default_filterable() -> bool {
    true
}

/// Contents of a catalogue file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogFile {
    /// Attribute metadata.
    pub attributes: Vec<AttributeDef>,
    /// Earliest new-arrival date by category id; `0` is the shop-wide cutoff.
    pub new_arrivals: BTreeMap<i64, NaiveDate>,
    /// Product documents.
    pub products: Vec<Document>,
    /// SKU documents.
    pub skus: Vec<Document>,
}

impl CatalogFile {
    /// Reads and parses a catalogue file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let text = fs::read_to_string(path).map_err(|e| IndexError::CatalogFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let catalog = Self::parse(&text).map_err(|e| IndexError::CatalogFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            path = %path.display(),
            products = catalog.products.len(),
            skus = catalog.skus.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parses catalogue JSON.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Names of every field used by the given documents.
pub fn field_names(documents: &[Document]) -> BTreeSet<&str> {
    documents
        .iter()
        .flat_map(|doc| doc.keys().map(String::as_str))
        .collect()
}

/// Attribute and category metadata backed by a catalogue file.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    /// Codes of filterable attributes.
    filterable: HashSet<String>,
    /// New-arrival cutoffs by category id.
    cutoffs: BTreeMap<i64, NaiveDate>,
    /// Cutoff used when the catalogue gives none.
    fallback: NaiveDate,
}

impl StaticCatalog {
    /// Creates the metadata view of a catalogue.
    ///
    /// Categories without a cutoff use the shop-wide cutoff, and failing that
    /// `new_arrival_days` before `today`.
    pub fn new(catalog: &CatalogFile, new_arrival_days: u32, today: NaiveDate) -> Self {
        let filterable = catalog
            .attributes
            .iter()
            .filter(|attr| attr.filterable)
            .map(|attr| attr.code.clone())
            .collect();
        let fallback = today
            .checked_sub_days(Days::new(u64::from(new_arrival_days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            filterable,
            cutoffs: catalog.new_arrivals.clone(),
            fallback,
        }
    }
}

impl AttributeCatalog for StaticCatalog {
    fn filterable_attribute_codes(&self) -> Result<HashSet<String>, NavigationError> {
        Ok(self.filterable.clone())
    }
}

impl CategoryCatalog for StaticCatalog {
    fn new_arrival_cutoff(
        &self,
        category_id: i64,
        _shop_id: i64,
    ) -> Result<NaiveDate, NavigationError> {
        Ok(self
            .cutoffs
            .get(&category_id)
            .or_else(|| self.cutoffs.get(&SHOP_WIDE_CATEGORY))
            .copied()
            .unwrap_or(self.fallback))
    }
}
