//! Error types for navigation compilation.

use thiserror::Error;

/// Failures of the collaborators the compiler depends on.
///
/// Malformed filter values never produce an error; they simply add no constraint.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Attribute metadata could not be retrieved.
    #[error("attribute metadata lookup failed: {0}")]
    Metadata(String),

    /// Category data could not be retrieved.
    #[error("category lookup failed for category {category_id}: {message}")]
    Category {
        /// Category that was being resolved.
        category_id: i64,
        /// Error message.
        message: String,
    },

    /// The catalog could not count matching products.
    #[error("catalog count failed: {0}")]
    Count(String),
}
