//! Collaborators the compiler consults while building a navigation context.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{NavigationContext, NavigationError};

/// Category id that stands for the whole shop.
pub const SHOP_WIDE_CATEGORY: i64 = 0;

/// Source of attribute metadata.
pub trait AttributeCatalog: Send + Sync {
    /// Returns the codes of attributes that may be used as navigation filters.
    fn filterable_attribute_codes(&self) -> Result<HashSet<String>, NavigationError>;
}

/// Source of category data.
pub trait CategoryCatalog: Send + Sync {
    /// Returns the earliest creation date that still counts as a new arrival in the
    /// category. [`SHOP_WIDE_CATEGORY`] asks for the shop-wide cutoff.
    fn new_arrival_cutoff(
        &self,
        category_id: i64,
        shop_id: i64,
    ) -> Result<NaiveDate, NavigationError>;
}

/// Counts products matched by a navigation context.
pub trait ProductCounter: Send + Sync {
    /// Returns the number of products matching the context's product query.
    ///
    /// Must be deterministic for a fixed index snapshot.
    fn count_matching(&self, context: &NavigationContext) -> Result<u64, NavigationError>;
}

/// A catalog item resolved by a previous search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductHit {
    /// Product identifier.
    pub id: i64,
    /// Relevance score.
    pub score: f32,
}
