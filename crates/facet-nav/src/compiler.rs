//! Navigation compiler.
//!
//! Turns a navigation request (shop scope, categories, filter map) into a
//! [`NavigationContext`] holding the product and SKU queries to run.
//!
//! Every filter value yields a strict and a relaxed fragment. The strict product chain is
//! probed once against the catalogue; when it matches nothing the relaxed chains are
//! committed instead, so a navigation degrades to broader results rather than none.

use std::{collections::HashSet, iter, sync::Arc};

use chrono::{NaiveDate, Utc};
use facet_config::{Config, NavigationSettings};
use facet_query::{Clause, Occur, QueryNode};
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    AttributeCatalog, CategoryCatalog, FilterValue, NavigationContext, NavigationError,
    ProductCounter, ProductHit,
    boost::{product_boost, sku_boost},
    builder::{FieldQueryBuilder, Scope, SearchQueryBuilder},
    catalog::SHOP_WIDE_CATEGORY,
    context::FilterParameters,
    params,
    registry::BuilderRegistry,
};

/// Filter values of a request, keyed by parameter in request order.
pub type FilterMap = IndexMap<String, Vec<FilterValue>>;

/// Compiler behaviour that is fixed at wiring time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Tag value that stands for "recently added".
    pub new_arrival_tag: String,
    /// Restrict every navigation to products in stock in the customer shop.
    pub enforce_in_stock: bool,
    /// Restrict every navigation to products priced in the customer shop.
    pub enforce_has_price: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self::from(&NavigationSettings::default())
    }
}

impl From<&NavigationSettings> for CompilerOptions {
    fn from(settings: &NavigationSettings) -> Self {
        Self {
            new_arrival_tag: settings.new_arrival_tag.clone(),
            enforce_in_stock: settings.enforce_in_stock,
            enforce_has_price: settings.enforce_has_price,
        }
    }
}

/// Per-chain clause lists.
#[derive(Debug, Default)]
struct Chains {
    /// Strict product clauses.
    product_strict: Vec<QueryNode>,
    /// Relaxed product clauses.
    product_relaxed: Vec<QueryNode>,
    /// Strict SKU clauses.
    sku_strict: Vec<QueryNode>,
    /// Relaxed SKU clauses.
    sku_relaxed: Vec<QueryNode>,
}

impl Chains {
    /// Adds one parameter's per-value clauses, combining alternatives with `Should`.
    fn absorb(&mut self, parameter: Self) {
        self.product_strict
            .extend(QueryNode::any_or_single(parameter.product_strict));
        self.product_relaxed
            .extend(QueryNode::any_or_single(parameter.product_relaxed));
        self.sku_strict
            .extend(QueryNode::any_or_single(parameter.sku_strict));
        self.sku_relaxed
            .extend(QueryNode::any_or_single(parameter.sku_relaxed));
    }

    /// Adds a clause to both product chains when present.
    fn require(&mut self, clause: Option<QueryNode>) {
        if let Some(clause) = clause {
            self.product_relaxed.push(clause.clone());
            self.product_strict.push(clause);
        }
    }
}

/// Compiles navigation requests.
///
/// The compiler holds no per-request state and can be shared across threads.
pub struct NavigationCompiler {
    /// Builder wiring.
    registry: BuilderRegistry,
    /// Fixed behaviour.
    options: CompilerOptions,
    /// Attribute metadata.
    attributes: Arc<dyn AttributeCatalog>,
    /// Category data.
    categories: Arc<dyn CategoryCatalog>,
    /// Count oracle used by the zero-result probe.
    counter: Arc<dyn ProductCounter>,
}

impl NavigationCompiler {
    /// Creates a compiler from explicit parts.
    pub fn new(
        registry: BuilderRegistry,
        options: CompilerOptions,
        attributes: Arc<dyn AttributeCatalog>,
        categories: Arc<dyn CategoryCatalog>,
        counter: Arc<dyn ProductCounter>,
    ) -> Self {
        Self {
            registry,
            options,
            attributes,
            categories,
            counter,
        }
    }

    /// Creates a compiler with the standard builders, configured from `config`.
    pub fn from_config(
        config: &Config,
        attributes: Arc<dyn AttributeCatalog>,
        categories: Arc<dyn CategoryCatalog>,
        counter: Arc<dyn ProductCounter>,
    ) -> Self {
        Self::new(
            BuilderRegistry::standard(config),
            CompilerOptions::from(&config.navigation),
            attributes,
            categories,
            counter,
        )
    }

    /// Compiles a navigation request.
    ///
    /// Parameters that are neither registered nor filterable attributes are dropped.
    /// Values that build no clause are skipped. Collaborator failures are returned.
    pub fn compile_navigation(
        &self,
        scope: Scope,
        categories: &[i64],
        include_subcategories: bool,
        filters: &FilterMap,
    ) -> Result<NavigationContext, NavigationError> {
        let allowed = self.attributes.filterable_attribute_codes()?;
        let mut chains = Chains::default();
        let mut active = FilterParameters::new();
        let mut new_arrival_cutoff = None;

        for (parameter, values) in filters {
            if !self.is_allowed(&allowed, parameter) {
                debug!(parameter = %parameter, "dropping filter parameter");
                continue;
            }
            let product_builder = self.registry.product_builder_or_default(parameter);
            let sku_builder = self.registry.sku_builder_or_default(parameter);
            let relax = self.registry.is_relaxed(parameter);
            let mut clauses = Chains::default();

            for value in values {
                let substituted;
                let search_value = if self.is_new_arrival(product_builder, value) {
                    let cutoff = match new_arrival_cutoff {
                        Some(cutoff) => cutoff,
                        None => {
                            let cutoff =
                                self.earliest_new_arrival_cutoff(scope.shop_id, categories)?;
                            new_arrival_cutoff = Some(cutoff);
                            cutoff
                        }
                    };
                    substituted = FilterValue::Date(cutoff);
                    &substituted
                } else {
                    value
                };

                let Some(strict) = product_builder.strict(scope, parameter, search_value) else {
                    continue;
                };
                active
                    .entry(parameter.clone())
                    .or_default()
                    .push(value.to_text());
                let relaxed = if relax {
                    product_builder.relaxed(scope, parameter, search_value)
                } else {
                    Some(strict.clone())
                };
                clauses.product_strict.push(strict);
                let Some(relaxed) = relaxed else {
                    continue;
                };
                clauses.product_relaxed.push(relaxed);

                let Some(sku_strict) = sku_builder.strict(scope, parameter, search_value) else {
                    continue;
                };
                let sku_relaxed = if relax {
                    sku_builder.relaxed(scope, parameter, search_value)
                } else {
                    Some(sku_strict.clone())
                };
                clauses.sku_strict.push(sku_strict);
                let Some(sku_relaxed) = sku_relaxed else {
                    continue;
                };
                clauses.sku_relaxed.push(sku_relaxed);
            }
            chains.absorb(clauses);
        }

        self.require_scope(scope, categories, include_subcategories, &mut chains);

        let Chains {
            product_strict,
            product_relaxed,
            sku_strict,
            sku_relaxed,
        } = chains;
        let strict_candidate = QueryNode::all(product_strict);
        let probe = NavigationContext::new(
            scope,
            categories.to_vec(),
            include_subcategories,
            active,
            strict_candidate,
            None,
        );
        let count = self.counter.count_matching(&probe)?;
        let relaxed = count == 0;

        let (product, sku) = if relaxed {
            (
                product_boost(QueryNode::all(product_relaxed)),
                sku_boost(QueryNode::any(sku_relaxed)),
            )
        } else {
            (
                product_boost(probe.product_query().cloned()),
                sku_boost(QueryNode::any(sku_strict)),
            )
        };
        debug!(
            relaxed,
            strict_count = count,
            product = %render(product.as_ref()),
            sku = %render(sku.as_ref()),
            "compiled navigation"
        );
        Ok(probe.with_queries(product, sku, relaxed))
    }

    /// Narrows a compiled context by one more filter value.
    ///
    /// A value that builds no clause returns the context unchanged.
    pub fn snowball_product(
        &self,
        context: &NavigationContext,
        parameter: &str,
        value: &FilterValue,
    ) -> NavigationContext {
        let builder = self.registry.product_builder_or_default(parameter);
        let Some(clause) = builder.strict(context.scope(), parameter, value) else {
            return context.clone();
        };
        let mut filters = context.filter_parameters().clone();
        filters
            .entry(parameter.to_string())
            .or_default()
            .push(value.to_text());
        let product = QueryNode::all(
            context
                .product_query()
                .cloned()
                .into_iter()
                .chain(iter::once(clause))
                .collect(),
        );
        NavigationContext::new(
            context.scope(),
            context.categories().to_vec(),
            context.include_subcategories(),
            filters,
            None,
            None,
        )
        .with_queries(product, context.sku_query().cloned(), context.is_relaxed())
    }

    /// Pins the SKU query to the given products.
    ///
    /// The existing SKU query is kept as an optional (scoring) clause; membership in
    /// `items` is required. An empty item list returns the context unchanged.
    pub fn snowball_variant(
        &self,
        context: &NavigationContext,
        items: &[ProductHit],
    ) -> NavigationContext {
        if items.is_empty() {
            return context.clone();
        }
        let ids = FilterValue::List(items.iter().map(|hit| FilterValue::Number(hit.id)).collect());
        let pin = self.registry.sku_builder_or_default(params::PRODUCT_ID).strict(
            context.scope(),
            params::PRODUCT_ID,
            &ids,
        );

        let mut clauses = Vec::with_capacity(2);
        if let Some(existing) = context.sku_query() {
            clauses.push(Clause {
                occur: Occur::Should,
                node: existing.clone(),
            });
        }
        if let Some(pin) = pin {
            clauses.push(Clause {
                occur: Occur::Must,
                node: pin,
            });
        }
        let sku = (!clauses.is_empty()).then(|| QueryNode::Bool(clauses));
        context
            .clone()
            .with_queries(context.product_query().cloned(), sku, context.is_relaxed())
    }

    /// Returns the earliest new-arrival cutoff across the categories, or the shop-wide
    /// cutoff when no category is given. Never later than today.
    pub fn earliest_new_arrival_cutoff(
        &self,
        shop_id: i64,
        categories: &[i64],
    ) -> Result<NaiveDate, NavigationError> {
        if categories.is_empty() {
            return self
                .categories
                .new_arrival_cutoff(SHOP_WIDE_CATEGORY, shop_id);
        }
        let mut earliest = Utc::now().date_naive();
        for &category_id in categories {
            earliest = earliest.min(self.categories.new_arrival_cutoff(category_id, shop_id)?);
        }
        Ok(earliest)
    }

    /// Returns true when the parameter may be used as a filter.
    fn is_allowed(&self, attribute_codes: &HashSet<String>, parameter: &str) -> bool {
        self.registry.has_product_builder(parameter) || attribute_codes.contains(parameter)
    }

    /// Returns true when the value is the new-arrival token for a tag builder.
    fn is_new_arrival(&self, builder: &FieldQueryBuilder, value: &FilterValue) -> bool {
        builder.is_tag()
            && matches!(value, FilterValue::Text(text) if text.trim() == self.options.new_arrival_tag)
    }

    /// Appends category or shop, stock and price scope clauses to both product chains.
    fn require_scope(
        &self,
        scope: Scope,
        categories: &[i64],
        include_subcategories: bool,
        chains: &mut Chains,
    ) {
        let customer_shop = FilterValue::Number(scope.customer_shop_id);

        let category_parameter = if include_subcategories {
            params::CATEGORY_INC_PARENTS
        } else {
            params::CATEGORY
        };
        let category_ids = FilterValue::List(
            categories
                .iter()
                .map(|&id| FilterValue::Number(id))
                .collect(),
        );
        let category = self
            .registry
            .product_builder(category_parameter)
            .and_then(|b| b.strict(scope, category_parameter, &category_ids));
        let location = category.or_else(|| {
            self.registry
                .product_builder(params::SHOP)
                .and_then(|b| b.strict(scope, params::SHOP, &customer_shop))
        });
        chains.require(location);

        if self.options.enforce_in_stock {
            // Any value but "0" selects the in-stock flag.
            let wanted = FilterValue::Number(1);
            let in_stock = self
                .registry
                .product_builder(params::SHOP_IN_STOCK)
                .and_then(|b| b.strict(scope, params::SHOP_IN_STOCK, &wanted));
            chains.require(in_stock);
        }
        if self.options.enforce_has_price {
            let has_price = self
                .registry
                .product_builder(params::SHOP_HAS_PRICE)
                .and_then(|b| b.strict(scope, params::SHOP_HAS_PRICE, &customer_shop));
            chains.require(has_price);
        }
    }
}

/// Renders an optional query for logging.
fn render(query: Option<&QueryNode>) -> String {
    query.map_or_else(|| "*".to_string(), QueryNode::to_query_string)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    /// Attribute metadata with a fixed code set.
    struct Attributes(HashSet<String>);

    impl AttributeCatalog for Attributes {
        fn filterable_attribute_codes(&self) -> Result<HashSet<String>, NavigationError> {
            Ok(self.0.clone())
        }
    }

    /// Category data with fixed cutoffs.
    struct Categories(HashMap<i64, NaiveDate>);

    impl CategoryCatalog for Categories {
        fn new_arrival_cutoff(
            &self,
            category_id: i64,
            _shop_id: i64,
        ) -> Result<NaiveDate, NavigationError> {
            self.0
                .get(&category_id)
                .copied()
                .ok_or_else(|| NavigationError::Category {
                    category_id,
                    message: "unknown category".into(),
                })
        }
    }

    /// Count oracle returning a fixed count and recording its calls.
    struct Counter {
        count: u64,
        calls: AtomicUsize,
    }

    impl ProductCounter for Counter {
        fn count_matching(&self, _context: &NavigationContext) -> Result<u64, NavigationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.count)
        }
    }

    /// Count oracle that always fails.
    struct Unreachable;

    impl ProductCounter for Unreachable {
        fn count_matching(&self, _context: &NavigationContext) -> Result<u64, NavigationError> {
            Err(NavigationError::Count("index offline".into()))
        }
    }

    const SCOPE: Scope = Scope {
        shop_id: 10,
        customer_shop_id: 1010,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn compiler_with(count: u64) -> (NavigationCompiler, Arc<Counter>) {
        let counter = Arc::new(Counter {
            count,
            calls: AtomicUsize::new(0),
        });
        let attributes = Attributes(["color".to_string()].into_iter().collect());
        let categories = Categories(HashMap::from([
            (SHOP_WIDE_CATEGORY, date(2023, 12, 1)),
            (101, date(2024, 2, 1)),
            (102, date(2024, 1, 10)),
        ]));
        let compiler = NavigationCompiler::from_config(
            &Config::default(),
            Arc::new(attributes),
            Arc::new(categories),
            counter.clone(),
        );
        (compiler, counter)
    }

    fn filters(entries: &[(&str, FilterValue)]) -> FilterMap {
        let mut map = FilterMap::new();
        for (name, value) in entries {
            map.entry(name.to_string()).or_default().push(value.clone());
        }
        map
    }

    #[test]
    fn strict_navigation_commits_strict_chain() {
        let (compiler, counter) = compiler_with(5);
        let ctx = compiler
            .compile_navigation(
                SCOPE,
                &[],
                false,
                &filters(&[("brand", "Nike".into())]),
            )
            .unwrap();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
        assert!(!ctx.is_relaxed());
        assert_eq!(
            ctx.product_query().unwrap().to_query_string(),
            "boost(+(brand:nike)^1.0 +(shopId:1010)^1.0 +shopInStockFlag1:1010 \
             +(shopHasPrice:1010)^1.0, [productCategory_boost, productShopInStock_boost, \
             featured_boost])"
        );
        assert_eq!(ctx.filter_parameters()["brand"], vec!["Nike"]);
        assert!(ctx.is_global());
    }

    #[test]
    fn customer_shop_zero_still_requires_stock() {
        let (compiler, _) = compiler_with(5);
        let scope = Scope::new(0, 0);
        let ctx = compiler
            .compile_navigation(scope, &[], false, &FilterMap::new())
            .unwrap();
        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(rendered.contains("+shopInStockFlag1:0"), "{rendered}");
        assert!(!rendered.contains("shopInStockFlag0"));
    }

    #[test]
    fn keyword_without_searchable_words_is_dropped() {
        let (compiler, counter) = compiler_with(5);
        let ctx = compiler
            .compile_navigation(
                SCOPE,
                &[],
                false,
                &filters(&[("query", "a".into()), ("brand", "Nike".into())]),
            )
            .unwrap();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
        assert!(!ctx.is_relaxed());
        assert!(!ctx.is_filtered_by("query"));
        assert!(ctx.is_filtered_by("brand"));
        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(!rendered.contains("name:"), "{rendered}");
    }

    #[test]
    fn zero_results_commit_relaxed_chain() {
        let (compiler, counter) = compiler_with(0);
        let request = filters(&[("query", "Search, Word".into())]);
        let ctx = compiler
            .compile_navigation(SCOPE, &[], false, &request)
            .unwrap();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
        assert!(ctx.is_relaxed());

        let (strict_compiler, _) = compiler_with(3);
        let strict = strict_compiler
            .compile_navigation(SCOPE, &[], false, &request)
            .unwrap();
        assert_ne!(ctx.product_query(), strict.product_query());
        assert_eq!(ctx, strict);

        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(rendered.contains("name_stem:search~2"));
        assert!(!rendered.contains("search, word"));
    }

    #[test]
    fn probe_runs_once_for_many_values() {
        let (compiler, counter) = compiler_with(1);
        let mut request = FilterMap::new();
        request.insert(
            "brand".into(),
            vec!["Nike".into(), "Puma".into(), "Adidas".into()],
        );
        request.insert("color".into(), vec!["red".into(), "blue".into()]);
        compiler
            .compile_navigation(SCOPE, &[101], true, &request)
            .unwrap();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn several_values_are_alternatives() {
        let (compiler, _) = compiler_with(1);
        let mut request = FilterMap::new();
        request.insert("brand".into(), vec!["Nike".into(), "Puma".into()]);
        let ctx = compiler
            .compile_navigation(SCOPE, &[101], false, &request)
            .unwrap();
        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(rendered.starts_with(
            "boost(+((brand:nike)^1.0 (brand:puma)^1.0) +productCategory:101 "
        ));
    }

    #[test]
    fn categories_replace_shop_scope() {
        let (compiler, _) = compiler_with(1);
        let ctx = compiler
            .compile_navigation(SCOPE, &[101, 102], true, &FilterMap::new())
            .unwrap();
        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(rendered.contains(
            "+(productCategoryIncParents:101 productCategoryIncParents:102)"
        ));
        assert!(!rendered.contains("shopId:"));
        assert!(!ctx.is_global());
    }

    #[test]
    fn disallowed_parameters_are_dropped() {
        let (compiler, _) = compiler_with(1);
        let ctx = compiler
            .compile_navigation(
                SCOPE,
                &[],
                false,
                &filters(&[
                    ("color", "Red".into()),
                    ("secretField", "x".into()),
                    ("brand", "".into()),
                ]),
            )
            .unwrap();
        assert!(ctx.is_filtered_by("color"));
        assert!(!ctx.is_filtered_by("secretField"));
        assert!(!ctx.is_filtered_by("brand"));
        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(rendered.contains("(facet_color:red)^1.0"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn scope_enforcement_follows_options() {
        let (compiler, _) = compiler_with(1);
        let mut config = Config::default();
        config.navigation.enforce_in_stock = false;
        config.navigation.enforce_has_price = false;
        let relaxed_compiler = NavigationCompiler::new(
            BuilderRegistry::standard(&config),
            CompilerOptions::from(&config.navigation),
            compiler.attributes.clone(),
            compiler.categories.clone(),
            compiler.counter.clone(),
        );
        let ctx = relaxed_compiler
            .compile_navigation(SCOPE, &[], false, &FilterMap::new())
            .unwrap();
        assert_eq!(
            ctx.product_query().unwrap().to_query_string(),
            "boost(+(shopId:1010)^1.0, [productCategory_boost, productShopInStock_boost, \
             featured_boost])"
        );
    }

    #[test]
    fn new_arrival_uses_earliest_category_cutoff() {
        let (compiler, _) = compiler_with(1);
        assert_eq!(
            compiler
                .earliest_new_arrival_cutoff(10, &[101, 102])
                .unwrap(),
            date(2024, 1, 10)
        );
        assert_eq!(
            compiler.earliest_new_arrival_cutoff(10, &[]).unwrap(),
            date(2023, 12, 1)
        );

        let ctx = compiler
            .compile_navigation(
                SCOPE,
                &[101, 102],
                false,
                &filters(&[("tag", "newarrival".into())]),
            )
            .unwrap();
        let millis = crate::value::date_to_millis(date(2024, 1, 10));
        let rendered = ctx.product_query().unwrap().to_query_string();
        assert!(rendered.contains(&format!("+createdTimestamp:[{millis} TO *]")));
        assert_eq!(ctx.filter_parameters()["tag"], vec!["newarrival"]);
    }

    #[test]
    fn collaborator_failures_propagate() {
        let (compiler, _) = compiler_with(1);
        let err = compiler
            .compile_navigation(
                SCOPE,
                &[999],
                false,
                &filters(&[("tag", "newarrival".into())]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            NavigationError::Category {
                category_id: 999,
                ..
            }
        ));

        let failing = NavigationCompiler::new(
            BuilderRegistry::standard(&Config::default()),
            CompilerOptions::default(),
            compiler.attributes.clone(),
            compiler.categories.clone(),
            Arc::new(Unreachable),
        );
        let err = failing
            .compile_navigation(SCOPE, &[], false, &FilterMap::new())
            .unwrap_err();
        assert!(matches!(err, NavigationError::Count(_)));
    }

    #[test]
    fn same_request_gives_equal_contexts() {
        let (compiler, _) = compiler_with(1);
        let a = compiler
            .compile_navigation(
                SCOPE,
                &[101],
                true,
                &filters(&[("brand", "Nike".into()), ("color", "Red".into())]),
            )
            .unwrap();
        let b = compiler
            .compile_navigation(
                SCOPE,
                &[101],
                true,
                &filters(&[("color", "Red".into()), ("brand", "Nike".into())]),
            )
            .unwrap();
        assert_eq!(a, b);

        let c = compiler
            .compile_navigation(
                SCOPE,
                &[101],
                true,
                &filters(&[
                    ("color", "Red".into()),
                    ("brand", "Nike".into()),
                    ("productType", "Shoe".into()),
                ]),
            )
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn snowball_product_appends_value() {
        let (compiler, _) = compiler_with(1);
        let ctx = compiler
            .compile_navigation(SCOPE, &[], false, &filters(&[("brand", "Nike".into())]))
            .unwrap();
        let narrowed = compiler.snowball_product(&ctx, "brand", &"Nike".into());

        assert_eq!(narrowed.filter_parameters()["brand"], vec!["Nike", "Nike"]);
        let clauses = narrowed.product_query().unwrap().clauses().unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(Some(&clauses[0].node), ctx.product_query());
        assert_eq!(
            clauses[1].node,
            QueryNode::term("brand", "nike").boosted(1.0)
        );
        assert!(clauses.iter().all(|c| c.occur == Occur::Must));
        assert_eq!(narrowed.sku_query(), ctx.sku_query());
        assert_ne!(narrowed, ctx);
    }

    #[test]
    fn snowball_product_without_clause_is_noop() {
        let (compiler, _) = compiler_with(1);
        let ctx = compiler
            .compile_navigation(SCOPE, &[], false, &FilterMap::new())
            .unwrap();
        let same = compiler.snowball_product(&ctx, "color", &"  ".into());
        assert_eq!(same, ctx);
        assert_eq!(same.product_query(), ctx.product_query());
        assert!(!same.is_filtered_by("color"));
    }

    #[test]
    fn snowball_variant_pins_products() {
        let (compiler, _) = compiler_with(1);
        let ctx = compiler
            .compile_navigation(SCOPE, &[], false, &filters(&[("query", "shoe".into())]))
            .unwrap();
        let hits = [
            ProductHit { id: 1, score: 2.0 },
            ProductHit { id: 2, score: 1.0 },
        ];
        let pinned = compiler.snowball_variant(&ctx, &hits);
        let clauses = pinned.sku_query().unwrap().clauses().unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].occur, Occur::Should);
        assert_eq!(Some(&clauses[0].node), ctx.sku_query());
        assert_eq!(clauses[1].occur, Occur::Must);
        assert_eq!(
            clauses[1].node.to_query_string(),
            "(productId:1)^1.0 (productId:2)^1.0"
        );
        assert_eq!(pinned.product_query(), ctx.product_query());

        let unchanged = compiler.snowball_variant(&ctx, &[]);
        assert_eq!(unchanged.sku_query(), ctx.sku_query());
    }

    #[test]
    fn snowball_variant_without_sku_query() {
        let (compiler, _) = compiler_with(1);
        let ctx = compiler
            .compile_navigation(SCOPE, &[], false, &FilterMap::new())
            .unwrap();
        assert_eq!(ctx.sku_query(), None);
        let pinned = compiler.snowball_variant(&ctx, &[ProductHit { id: 7, score: 1.0 }]);
        assert_eq!(
            pinned.sku_query().unwrap().to_query_string(),
            "+(productId:7)^1.0"
        );
    }
}
