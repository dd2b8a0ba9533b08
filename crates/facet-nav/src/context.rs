//! Compiled navigation state.

use std::hash::{Hash, Hasher};

use facet_query::QueryNode;
use indexmap::IndexMap;

use crate::builder::Scope;

/// Literal filter values that contributed to a navigation, keyed by parameter.
pub type FilterParameters = IndexMap<String, Vec<String>>;

/// Immutable result of compiling a navigation request.
///
/// Two contexts are equal when they describe the same navigation: same shop scope,
/// categories and applied filters. The compiled queries are derived from those and take
/// no part in equality or hashing, which makes contexts usable as cache keys.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    /// Owning shop.
    shop_id: i64,
    /// Customer-facing shop.
    customer_shop_id: i64,
    /// Requested categories, in request order.
    categories: Vec<i64>,
    /// Whether subcategories were included.
    include_subcategories: bool,
    /// Applied filter literals.
    filter_parameters: FilterParameters,
    /// Query over the product index.
    product_query: Option<QueryNode>,
    /// Query over the SKU index.
    sku_query: Option<QueryNode>,
    /// Whether the queries come from the relaxed tier.
    relaxed: bool,
}

impl NavigationContext {
    /// Creates a context.
    pub(crate) fn new(
        scope: Scope,
        categories: Vec<i64>,
        include_subcategories: bool,
        filter_parameters: FilterParameters,
        product_query: Option<QueryNode>,
        sku_query: Option<QueryNode>,
    ) -> Self {
        Self {
            shop_id: scope.shop_id,
            customer_shop_id: scope.customer_shop_id,
            categories,
            include_subcategories,
            filter_parameters,
            product_query,
            sku_query,
            relaxed: false,
        }
    }

    /// Replaces both queries, keeping the navigation description.
    pub(crate) fn with_queries(
        mut self,
        product_query: Option<QueryNode>,
        sku_query: Option<QueryNode>,
        relaxed: bool,
    ) -> Self {
        self.product_query = product_query;
        self.sku_query = sku_query;
        self.relaxed = relaxed;
        self
    }

    /// Owning shop.
    pub fn shop_id(&self) -> i64 {
        self.shop_id
    }

    /// Customer-facing shop.
    pub fn customer_shop_id(&self) -> i64 {
        self.customer_shop_id
    }

    /// Shop scope of the navigation.
    pub fn scope(&self) -> Scope {
        Scope::new(self.shop_id, self.customer_shop_id)
    }

    /// Requested categories.
    pub fn categories(&self) -> &[i64] {
        &self.categories
    }

    /// Whether subcategories were included.
    pub fn include_subcategories(&self) -> bool {
        self.include_subcategories
    }

    /// Applied filter literals, in application order.
    pub fn filter_parameters(&self) -> &FilterParameters {
        &self.filter_parameters
    }

    /// Query over the product index; `None` matches everything.
    pub fn product_query(&self) -> Option<&QueryNode> {
        self.product_query.as_ref()
    }

    /// Query over the SKU index; `None` matches everything.
    pub fn sku_query(&self) -> Option<&QueryNode> {
        self.sku_query.as_ref()
    }

    /// Returns true when the strict navigation matched nothing and the queries come from
    /// the relaxed tier.
    pub fn is_relaxed(&self) -> bool {
        self.relaxed
    }

    /// Returns true when the navigation is not restricted to any category.
    pub fn is_global(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns true when a filter was applied for the parameter.
    pub fn is_filtered_by(&self, parameter: &str) -> bool {
        self.filter_parameters
            .get(parameter)
            .is_some_and(|values| !values.is_empty())
    }
}

impl PartialEq for NavigationContext {
    fn eq(&self, other: &Self) -> bool {
        self.shop_id == other.shop_id
            && self.customer_shop_id == other.customer_shop_id
            && self.categories == other.categories
            && self.include_subcategories == other.include_subcategories
            && self.filter_parameters == other.filter_parameters
    }
}

impl Eq for NavigationContext {}

impl Hash for NavigationContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shop_id.hash(state);
        self.customer_shop_id.hash(state);
        self.categories.hash(state);
        self.include_subcategories.hash(state);
        // Map equality ignores key order, so the hash must too.
        let mut entries: Vec<_> = self.filter_parameters.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.hash(state);
    }
}
