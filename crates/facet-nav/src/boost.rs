//! Per-document boost overlays applied to committed queries.

use facet_query::QueryNode;

/// Product boost fields, added to the relevance score of every product hit.
pub const PRODUCT_BOOST_FIELDS: &[&str] = &[
    "productCategory_boost",
    "productShopInStock_boost",
    "featured_boost",
];

/// SKU boost fields.
pub const SKU_BOOST_FIELDS: &[&str] = &["rank_boost"];

/// Wraps a product query with the product boost fields.
pub fn product_boost(query: Option<QueryNode>) -> Option<QueryNode> {
    query.map(|q| q.with_boost_fields(PRODUCT_BOOST_FIELDS.iter().copied()))
}

/// Wraps a SKU query with the SKU boost fields.
pub fn sku_boost(query: Option<QueryNode>) -> Option<QueryNode> {
    query.map(|q| q.with_boost_fields(SKU_BOOST_FIELDS.iter().copied()))
}
