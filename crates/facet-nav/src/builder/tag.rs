//! Tag builder.

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::{FilterValue, fields, value::date_to_millis};

/// Matches a product tag, or, for a date, products created on or after that date.
///
/// The compiler substitutes the new-arrival tag with its cutoff date before calling this
/// builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagBuilder;

impl SearchQueryBuilder for TagBuilder {
    fn strict(&self, _scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| match item {
            FilterValue::Date(date) => Some(QueryNode::range(
                fields::CREATED,
                Some(date_to_millis(*date)),
                None,
            )),
            other => Some(
                QueryNode::term(fields::TAG, other.to_text().trim().to_lowercase()).boosted(1.0),
            ),
        })
    }
}
