//! Field query builders.
//!
//! Each builder turns one filter value into a query fragment for one family of index
//! fields. Builders are stateless strategies fixed at wiring time; the closed set of
//! strategies is [`FieldQueryBuilder`].
//!
//! Every builder follows the same value rules:
//! - blank text or an empty list yields `None` (no constraint)
//! - a single-element list behaves exactly like its element
//! - a longer list yields a `Should` composite of the element fragments

mod category;
mod keyword;
mod numeric;
mod price;
mod stock;
mod tag;
mod term;

pub use category::CategoryBuilder;
use facet_query::QueryNode;
pub use keyword::{KeywordBuilder, split_for_search};
pub use numeric::{IdentityBuilder, NumericBuilder};
pub use price::{PriceBuilder, decompose_price};
pub use stock::InStockBuilder;
pub use tag::TagBuilder;
pub use term::{AttributeBuilder, TermBuilder};

use crate::FilterValue;

/// Store scope a query is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    /// Owning shop.
    pub shop_id: i64,
    /// Shop whose prices and stock the customer sees (may be a sub-shop).
    pub customer_shop_id: i64,
}

impl Scope {
    /// Creates a scope.
    pub fn new(shop_id: i64, customer_shop_id: i64) -> Self {
        Self {
            shop_id,
            customer_shop_id,
        }
    }
}

/// Builds strict and relaxed query fragments for a filter value.
pub trait SearchQueryBuilder {
    /// Builds the high-precision fragment, or `None` when the value adds no constraint.
    fn strict(&self, scope: Scope, parameter: &str, value: &FilterValue) -> Option<QueryNode>;

    /// Builds the fallback fragment used when the strict navigation finds nothing.
    ///
    /// Defaults to the strict fragment.
    fn relaxed(&self, scope: Scope, parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        self.strict(scope, parameter, value)
    }
}

/// The closed set of builder strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldQueryBuilder {
    /// Exact term on a fixed field.
    Term(TermBuilder),
    /// Exact term on the facet field of the requested attribute.
    Attribute(AttributeBuilder),
    /// Integer equality.
    Numeric(NumericBuilder),
    /// Identifier list.
    Identity(IdentityBuilder),
    /// Price band range.
    Price(PriceBuilder),
    /// Free-text keyword search.
    Keyword(KeywordBuilder),
    /// Stock flag.
    InStock(InStockBuilder),
    /// Category membership.
    Category(CategoryBuilder),
    /// Tags and new arrivals.
    Tag(TagBuilder),
}

impl FieldQueryBuilder {
    /// Returns true for the tag strategy, which understands new-arrival dates.
    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag(_))
    }

    /// Returns the strategy as a trait object.
    fn strategy(&self) -> &dyn SearchQueryBuilder {
        match self {
            Self::Term(b) => b,
            Self::Attribute(b) => b,
            Self::Numeric(b) => b,
            Self::Identity(b) => b,
            Self::Price(b) => b,
            Self::Keyword(b) => b,
            Self::InStock(b) => b,
            Self::Category(b) => b,
            Self::Tag(b) => b,
        }
    }
}

impl SearchQueryBuilder for FieldQueryBuilder {
    fn strict(&self, scope: Scope, parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        self.strategy().strict(scope, parameter, value)
    }

    fn relaxed(&self, scope: Scope, parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        self.strategy().relaxed(scope, parameter, value)
    }
}

impl From<TermBuilder> for FieldQueryBuilder {
    fn from(builder: TermBuilder) -> Self {
        Self::Term(builder)
    }
}

impl From<AttributeBuilder> for FieldQueryBuilder {
    fn from(builder: AttributeBuilder) -> Self {
        Self::Attribute(builder)
    }
}

/// Applies `build` to every alternative carried by `value`.
///
/// Blank values and empty lists yield `None`; a single-element list is treated as its
/// element; several alternatives are joined with `Should`.
pub(crate) fn alternatives(
    value: &FilterValue,
    build: &dyn Fn(&FilterValue) -> Option<QueryNode>,
) -> Option<QueryNode> {
    match value {
        FilterValue::List(items) if items.len() == 1 => alternatives(&items[0], build),
        FilterValue::List(items) => QueryNode::any(
            items
                .iter()
                .filter_map(|item| alternatives(item, build))
                .collect(),
        ),
        other if other.is_blank() => None,
        other => build(other),
    }
}
