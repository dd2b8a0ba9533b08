//! Stock availability builder.

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::{FilterValue, fields};

/// Restricts products to those in stock (or, for the value `0`, out of stock) in the
/// customer shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InStockBuilder;

impl SearchQueryBuilder for InStockBuilder {
    fn strict(&self, scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| {
            let in_stock = item.to_text().trim() != "0";
            Some(QueryNode::numeric(
                fields::in_stock_flag(in_stock),
                scope.customer_shop_id,
            ))
        })
    }
}
