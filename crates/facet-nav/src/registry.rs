//! Parameter to builder wiring.

use std::collections::{HashMap, HashSet};

use facet_config::Config;

use crate::{
    builder::{
        AttributeBuilder, CategoryBuilder, FieldQueryBuilder, IdentityBuilder, InStockBuilder,
        KeywordBuilder, NumericBuilder, PriceBuilder, TagBuilder, TermBuilder,
    },
    fields, params,
};

/// Builder used for attribute parameters when the registry has no explicit one.
static FALLBACK_ATTRIBUTE: FieldQueryBuilder = FieldQueryBuilder::Attribute(AttributeBuilder);

/// Builders for product and SKU queries, keyed by request parameter.
///
/// Parameters without a dedicated builder are treated as attribute codes and use the
/// builder registered under [`params::ATTRIBUTE`].
#[derive(Debug, Clone, Default)]
pub struct BuilderRegistry {
    /// Builders for the product index.
    product: HashMap<String, FieldQueryBuilder>,
    /// Builders for the SKU index.
    sku: HashMap<String, FieldQueryBuilder>,
    /// Parameters that get a distinct relaxed fragment.
    relaxed: HashSet<String>,
}

impl BuilderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires the standard catalogue builders.
    pub fn standard(config: &Config) -> Self {
        let nav = &config.navigation;
        let keyword = || KeywordBuilder::new(config.keyword.min_word_length);

        let mut registry = Self::new()
            .with_product(params::QUERY, FieldQueryBuilder::Keyword(keyword()))
            .with_product(params::BRAND, TermBuilder::new(fields::BRAND).into())
            .with_product(params::PRODUCT_TYPE, TermBuilder::new(fields::TYPE).into())
            .with_product(params::PRICE, FieldQueryBuilder::Price(PriceBuilder))
            .with_product(params::TAG, FieldQueryBuilder::Tag(TagBuilder))
            .with_product(
                params::PRODUCT_ID,
                FieldQueryBuilder::Identity(IdentityBuilder::new(fields::PRODUCT_ID)),
            )
            .with_product(params::SKU_CODE, TermBuilder::new(fields::SKU_CODE).into())
            .with_product(
                params::CATEGORY,
                FieldQueryBuilder::Category(CategoryBuilder::new(fields::CATEGORY)),
            )
            .with_product(
                params::CATEGORY_INC_PARENTS,
                FieldQueryBuilder::Category(CategoryBuilder::new(fields::CATEGORY_INC_PARENTS)),
            )
            .with_product(
                params::SHOP,
                FieldQueryBuilder::Numeric(NumericBuilder::new(fields::SHOP)),
            )
            .with_product(params::SHOP_IN_STOCK, FieldQueryBuilder::InStock(InStockBuilder))
            .with_product(
                params::SHOP_HAS_PRICE,
                FieldQueryBuilder::Numeric(NumericBuilder::new(fields::SHOP_HAS_PRICE)),
            )
            .with_product(params::ATTRIBUTE, AttributeBuilder.into())
            .with_sku(
                params::PRODUCT_ID,
                FieldQueryBuilder::Identity(IdentityBuilder::new(fields::PRODUCT_ID)),
            )
            .with_sku(params::QUERY, FieldQueryBuilder::Keyword(keyword()))
            .with_sku(params::SKU_CODE, TermBuilder::new(fields::CODE).into())
            .with_sku(params::ATTRIBUTE, AttributeBuilder.into());

        for parameter in &nav.relaxed_parameters {
            registry = registry.with_relaxed(parameter.trim());
        }
        registry
    }

    /// Registers a product builder.
    pub fn with_product(mut self, parameter: &str, builder: FieldQueryBuilder) -> Self {
        self.product.insert(parameter.to_string(), builder);
        self
    }

    /// Registers a SKU builder.
    pub fn with_sku(mut self, parameter: &str, builder: FieldQueryBuilder) -> Self {
        self.sku.insert(parameter.to_string(), builder);
        self
    }

    /// Marks a parameter as having a distinct relaxed fragment.
    pub fn with_relaxed(mut self, parameter: &str) -> Self {
        if !parameter.is_empty() {
            self.relaxed.insert(parameter.to_string());
        }
        self
    }

    /// Returns the product builder registered for exactly this parameter.
    pub fn product_builder(&self, parameter: &str) -> Option<&FieldQueryBuilder> {
        self.product.get(parameter)
    }

    /// Returns the product builder for the parameter, falling back to the attribute builder.
    pub fn product_builder_or_default(&self, parameter: &str) -> &FieldQueryBuilder {
        self.product
            .get(parameter)
            .or_else(|| self.product.get(params::ATTRIBUTE))
            .unwrap_or(&FALLBACK_ATTRIBUTE)
    }

    /// Returns the SKU builder for the parameter, falling back to the attribute builder.
    pub fn sku_builder_or_default(&self, parameter: &str) -> &FieldQueryBuilder {
        self.sku
            .get(parameter)
            .or_else(|| self.sku.get(params::ATTRIBUTE))
            .unwrap_or(&FALLBACK_ATTRIBUTE)
    }

    /// Returns true when the parameter has a dedicated product builder.
    pub fn has_product_builder(&self, parameter: &str) -> bool {
        self.product.contains_key(parameter)
    }

    /// Returns true when the parameter gets a distinct relaxed fragment.
    pub fn is_relaxed(&self, parameter: &str) -> bool {
        self.relaxed.contains(parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_wiring() {
        let registry = BuilderRegistry::standard(&Config::default());
        assert!(matches!(
            registry.product_builder(params::QUERY),
            Some(FieldQueryBuilder::Keyword(_))
        ));
        assert!(matches!(
            registry.product_builder(params::PRICE),
            Some(FieldQueryBuilder::Price(_))
        ));
        assert!(registry.product_builder(params::TAG).unwrap().is_tag());
        assert_eq!(
            registry.product_builder(params::SKU_CODE),
            Some(&FieldQueryBuilder::Term(TermBuilder::new(fields::SKU_CODE)))
        );
        assert_eq!(
            registry.sku_builder_or_default(params::SKU_CODE),
            &FieldQueryBuilder::Term(TermBuilder::new(fields::CODE))
        );
        assert!(registry.is_relaxed(params::QUERY));
        assert!(!registry.is_relaxed(params::BRAND));
    }

    #[test]
    fn unknown_parameters_use_attribute_builder() {
        let registry = BuilderRegistry::standard(&Config::default());
        assert!(!registry.has_product_builder("color"));
        assert_eq!(registry.product_builder_or_default("color"), &FALLBACK_ATTRIBUTE);
        assert_eq!(registry.sku_builder_or_default("color"), &FALLBACK_ATTRIBUTE);

        let empty = BuilderRegistry::new();
        assert_eq!(empty.product_builder_or_default("color"), &FALLBACK_ATTRIBUTE);
    }

    #[test]
    fn relaxed_parameters_follow_config() {
        let mut config = Config::default();
        config.navigation.relaxed_parameters = vec!["query".into(), " brand ".into(), "".into()];
        let registry = BuilderRegistry::standard(&config);
        assert!(registry.is_relaxed("brand"));
        assert!(!registry.is_relaxed(""));
    }
}
