//! Query algebra for faceted navigation.
//!
//! A compiled navigation query is a tree of [`QueryNode`]s:
//!
//! - **Term**: `brand:nike` - exact token match
//! - **Fuzzy**: `name:shoe~2` - token match within an edit distance
//! - **Numeric**: `shopId:10` - exact integer match
//! - **Range**: `price:[100 TO 200]` - inclusive integer range, bounds may be open
//! - **Bool**: `+a b` - clauses that must (`+`) or should match
//! - **Boost**: `(name:shoe)^4.0` - score multiplier
//! - **BoostFields**: adds per-document boost values to the score
//!
//! # Example
//!
//! ```
//! use facet_query::QueryNode;
//!
//! let query = QueryNode::all(vec![
//!     QueryNode::term("brand", "nike").boosted(1.0),
//!     QueryNode::numeric("shopId", 10),
//! ])
//! .unwrap();
//! assert_eq!(query.to_query_string(), "+(brand:nike)^1.0 +shopId:10");
//! ```

#![warn(missing_docs)]

mod node;
mod render;

pub use node::{Clause, Occur, QueryNode};
pub use render::escape_value;
