//! Integer equality builders.

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::FilterValue;

/// Matches the value as an integer in a fixed field.
///
/// Text that does not parse as an integer is treated as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericBuilder {
    /// Target field.
    field: String,
    /// Boost applied to every match.
    boost: f32,
}

impl NumericBuilder {
    /// Creates a builder for `field` with boost 1.0.
    pub fn new(field: impl Into<String>) -> Self {
        Self::with_boost(field, 1.0)
    }

    /// Creates a builder for `field` with a custom boost.
    pub fn with_boost(field: impl Into<String>, boost: f32) -> Self {
        Self {
            field: field.into(),
            boost,
        }
    }
}

impl SearchQueryBuilder for NumericBuilder {
    fn strict(&self, _scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| {
            Some(QueryNode::numeric(&self.field, item.to_number()).boosted(self.boost))
        })
    }
}

/// Matches any of a list of identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityBuilder(NumericBuilder);

impl IdentityBuilder {
    /// Creates a builder for the identifier field.
    pub fn new(field: impl Into<String>) -> Self {
        Self(NumericBuilder::new(field))
    }
}

impl SearchQueryBuilder for IdentityBuilder {
    fn strict(&self, scope: Scope, parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        self.0.strict(scope, parameter, value)
    }
}
