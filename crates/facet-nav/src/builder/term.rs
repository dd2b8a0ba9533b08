//! Exact term builders.

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::{FilterValue, fields};

/// Matches the lowercased value exactly in a fixed field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermBuilder {
    /// Target field.
    field: String,
    /// Boost applied to every term.
    boost: f32,
}

impl TermBuilder {
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

impl SearchQueryBuilder for TermBuilder {
    fn strict(&self, _scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        exact_terms(&self.field, self.boost, value)
    }
}

/// Matches the lowercased value exactly in the facet field of the requested attribute.
///
/// The parameter name is the attribute code, so `color=Red` targets `facet_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeBuilder;

impl SearchQueryBuilder for AttributeBuilder {
    fn strict(&self, _scope: Scope, parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        exact_terms(&fields::attribute_facet(parameter), 1.0, value)
    }
}

/// Boosted term per alternative in `value`.
fn exact_terms(field: &str, boost: f32, value: &FilterValue) -> Option<QueryNode> {
    alternatives(value, &|item| {
        Some(QueryNode::term(field, item.to_text().trim().to_lowercase()).boosted(boost))
    })
}
