//! Category membership builder.

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::FilterValue;

/// Matches any of the given category ids.
///
/// The field decides whether subcategories count: the direct membership field or the
/// field that also lists every ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBuilder {
    /// Target field.
    field: String,
}

impl CategoryBuilder {
    /// Creates a builder for the membership field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl SearchQueryBuilder for CategoryBuilder {
    fn strict(&self, _scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| {
            Some(QueryNode::numeric(&self.field, item.to_number()))
        })
    }
}
