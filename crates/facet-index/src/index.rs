//! The product and SKU indexes of one catalogue.

use facet_nav::{NavigationContext, NavigationError, ProductCounter};
use tracing::debug;

use crate::{
    IndexError,
    catalog::CatalogFile,
    schema::IndexKind,
    search::{CatalogHit, IndexPart},
    writer::build_part,
};

/// Searchable product and SKU indexes built from a catalogue file.
///
/// Serves as the count oracle of a navigation compiler and runs the committed queries
/// of a navigation context.
pub struct CatalogIndex {
    /// One document per product.
    products: IndexPart,
    /// One document per SKU.
    skus: IndexPart,
}

impl CatalogIndex {
    /// Indexes every product and SKU of the catalogue in memory.
    pub fn build(catalog: &CatalogFile, stemmer: &str) -> Result<Self, IndexError> {
        let products = build_part(IndexKind::Product, &catalog.products, stemmer)?;
        let skus = build_part(IndexKind::Sku, &catalog.skus, stemmer)?;
        debug!(
            products = products.num_docs(),
            skus = skus.num_docs(),
            "built catalog index"
        );
        Ok(Self { products, skus })
    }

    /// The product index.
    pub fn products(&self) -> &IndexPart {
        &self.products
    }

    /// The SKU index.
    pub fn skus(&self) -> &IndexPart {
        &self.skus
    }

    /// Runs the context's product query.
    pub fn search_products(
        &self,
        context: &NavigationContext,
        limit: usize,
    ) -> Result<Vec<CatalogHit>, IndexError> {
        self.products.search(context.product_query(), limit)
    }

    /// Runs the context's SKU query.
    pub fn search_skus(
        &self,
        context: &NavigationContext,
        limit: usize,
    ) -> Result<Vec<CatalogHit>, IndexError> {
        self.skus.search(context.sku_query(), limit)
    }
}

impl ProductCounter for CatalogIndex {
    fn count_matching(&self, context: &NavigationContext) -> Result<u64, NavigationError> {
        Ok(self.products.count(context.product_query())?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use facet_config::Config;
    use facet_nav::{FilterMap, FilterValue, NavigationCompiler, ProductHit, Scope};

    use super::*;
    use crate::StaticCatalog;

    const CATALOG: &str = r#"{
        "attributes": [{ "code": "color" }],
        "new_arrivals": { "0": "2024-01-01" },
        "products": [
            {
                "productId": 1, "name": "Trail running shoe", "brand": "Acme", "type": "shoe",
                "shopId": 10, "shopHasPrice": 10, "shopInStockFlag1": 10,
                "productCategory": 101, "productCategoryIncParents": [100, 101],
                "facet_color": "red", "facet_price_10_EUR_range": 4999,
                "createdTimestamp": "2024-03-01", "featured_boost": 100.0
            },
            {
                "productId": 2, "name": "Road shoe", "brand": "Bolt", "type": "shoe",
                "shopId": 10, "shopHasPrice": 10, "shopInStockFlag1": 10,
                "productCategory": 102, "productCategoryIncParents": [100, 102],
                "facet_color": "blue", "facet_price_10_EUR_range": 8999,
                "createdTimestamp": "2023-06-01"
            },
            {
                "productId": 3, "name": "Rain jacket", "brand": "Acme", "type": "jacket",
                "shopId": 10, "shopHasPrice": 10, "shopInStockFlag0": 10,
                "productCategory": 103, "productCategoryIncParents": [103],
                "facet_color": "red", "facet_price_10_EUR_range": 12000,
                "createdTimestamp": "2024-04-01"
            },
            { "name": "orphan without id" }
        ],
        "skus": [
            { "skuId": 11, "productId": 1, "code": "TS-RED-42", "facet_color": "red", "rank_boost": 50.0 },
            { "skuId": 12, "productId": 1, "code": "TS-RED-43" },
            { "skuId": 21, "productId": 2, "code": "RS-BLU-42", "facet_color": "blue" },
            { "skuId": 31, "productId": 3, "code": "RJ-RED-M", "facet_color": "red" }
        ]
    }"#;

    const SCOPE: Scope = Scope {
        shop_id: 10,
        customer_shop_id: 10,
    };

    struct Fixture {
        index: Arc<CatalogIndex>,
        compiler: NavigationCompiler,
    }

    fn fixture() -> Fixture {
        let catalog = CatalogFile::parse(CATALOG).unwrap();
        let index = Arc::new(CatalogIndex::build(&catalog, "english").unwrap());
        let meta = Arc::new(StaticCatalog::new(
            &catalog,
            90,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ));
        let compiler =
            NavigationCompiler::from_config(&Config::default(), meta.clone(), meta, index.clone());
        Fixture { index, compiler }
    }

    fn filters(entries: &[(&str, &str)]) -> FilterMap {
        let mut map = FilterMap::new();
        for (parameter, value) in entries {
            map.entry((*parameter).to_string())
                .or_default()
                .push(FilterValue::from(*value));
        }
        map
    }

    fn product_ids(fx: &Fixture, categories: &[i64], entries: &[(&str, &str)]) -> Vec<i64> {
        let context = fx
            .compiler
            .compile_navigation(SCOPE, categories, false, &filters(entries))
            .unwrap();
        let mut ids: Vec<i64> = fx
            .index
            .search_products(&context, 10)
            .unwrap()
            .iter()
            .map(|hit| hit.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn skips_documents_without_id() {
        let fx = fixture();
        assert_eq!(fx.index.products().num_docs(), 3);
        assert_eq!(fx.index.skus().num_docs(), 4);
        assert_eq!(fx.index.products().count(None).unwrap(), 3);
    }

    #[test]
    fn scope_excludes_out_of_stock() {
        let fx = fixture();
        assert_eq!(product_ids(&fx, &[], &[]), vec![1, 2]);
    }

    #[test]
    fn brand_and_attribute_filters() {
        let fx = fixture();
        assert_eq!(product_ids(&fx, &[], &[("brand", "ACME")]), vec![1]);
        assert_eq!(product_ids(&fx, &[], &[("color", "red")]), vec![1]);
        assert_eq!(
            product_ids(&fx, &[], &[("color", "red"), ("color", "blue")]),
            vec![1, 2]
        );
    }

    #[test]
    fn price_band_filter() {
        let fx = fixture();
        assert_eq!(product_ids(&fx, &[], &[("price", "EUR-_-40-_-60")]), vec![1]);
        assert_eq!(product_ids(&fx, &[], &[("price", "EUR-_-50-_-")]), vec![2]);
        assert_eq!(product_ids(&fx, &[], &[("price", "GBP-_-0-_-")]), Vec::<i64>::new());
    }

    #[test]
    fn category_scope() {
        let fx = fixture();
        assert_eq!(product_ids(&fx, &[101], &[]), vec![1]);
        let context = fx
            .compiler
            .compile_navigation(SCOPE, &[100], true, &FilterMap::new())
            .unwrap();
        assert_eq!(fx.index.search_products(&context, 10).unwrap().len(), 2);
    }

    #[test]
    fn new_arrival_tag_uses_cutoff() {
        let fx = fixture();
        assert_eq!(product_ids(&fx, &[], &[("tag", "newarrival")]), vec![1]);
    }

    #[test]
    fn keyword_search_ranks_featured_first() {
        let fx = fixture();
        let context = fx
            .compiler
            .compile_navigation(SCOPE, &[], false, &filters(&[("query", "shoe")]))
            .unwrap();
        assert!(!context.is_relaxed());
        let hits = fx.index.search_products(&context, 10).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[0].name.as_deref(), Some("Trail running shoe"));
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn unmatched_words_fall_back_to_relaxed() {
        let fx = fixture();
        let context = fx
            .compiler
            .compile_navigation(SCOPE, &[], false, &filters(&[("query", "trail jacket")]))
            .unwrap();
        assert!(context.is_relaxed());
        let ids: Vec<i64> = fx
            .index
            .search_products(&context, 10)
            .unwrap()
            .iter()
            .map(|hit| hit.id)
            .collect();
        assert!(ids.contains(&1));
        assert!(!ids.contains(&3));
    }

    #[test]
    fn variants_are_pinned_to_products() {
        let fx = fixture();
        let context = fx
            .compiler
            .compile_navigation(SCOPE, &[], false, &filters(&[("color", "red")]))
            .unwrap();
        let products: Vec<ProductHit> = fx
            .index
            .search_products(&context, 10)
            .unwrap()
            .iter()
            .map(CatalogHit::product_hit)
            .collect();
        let pinned = fx.compiler.snowball_variant(&context, &products);
        let skus = fx.index.search_skus(&pinned, 10).unwrap();
        let mut ids: Vec<i64> = skus.iter().map(|hit| hit.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![11, 12]);
        assert_eq!(skus[0].id, 11);
        assert!(skus.iter().all(|hit| hit.product_id == Some(1)));
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let fx = fixture();
        assert!(fx.index.products().search(None, 0).unwrap().is_empty());
    }
}
