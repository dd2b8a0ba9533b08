//! Query algebra nodes.
//!
//! Represents compiled navigation queries before they are handed to a search engine.

use std::fmt;

/// How a clause participates in a boolean composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    /// The clause must match.
    Must,
    /// The clause should match; at least one `Should` clause must match when there are
    /// no `Must` clauses.
    Should,
}

/// One clause of a boolean composite.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Occurrence of the clause.
    pub occur: Occur,
    /// The clause query.
    pub node: QueryNode,
}

/// A compiled query node.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Exact match of a single token in a field.
    Term {
        /// Field name.
        field: String,
        /// Token to match.
        value: String,
    },

    /// Approximate match of a single token within an edit distance.
    Fuzzy {
        /// Field name.
        field: String,
        /// Token to match.
        value: String,
        /// Maximum Levenshtein distance.
        max_edits: u8,
    },

    /// Exact match of an integer value.
    Numeric {
        /// Field name.
        field: String,
        /// Value to match.
        value: i64,
    },

    /// Inclusive integer range; a missing bound is open.
    Range {
        /// Field name.
        field: String,
        /// Lower bound.
        from: Option<i64>,
        /// Upper bound.
        to: Option<i64>,
    },

    /// Boolean composite of clauses.
    Bool(Vec<Clause>),

    /// Multiplies the score of the inner node.
    Boost {
        /// The boosted node.
        node: Box<Self>,
        /// Boost factor.
        factor: f32,
    },

    /// Adds per-document boost field values to the score of the inner node without
    /// changing which documents match.
    BoostFields {
        /// The wrapped node.
        node: Box<Self>,
        /// Names of numeric per-document boost fields.
        fields: Vec<String>,
    },
}

impl QueryNode {
    /// Creates a term node.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a fuzzy term node.
    pub fn fuzzy(field: impl Into<String>, value: impl Into<String>, max_edits: u8) -> Self {
        Self::Fuzzy {
            field: field.into(),
            value: value.into(),
            max_edits,
        }
    }

    /// Creates a numeric equality node.
    pub fn numeric(field: impl Into<String>, value: i64) -> Self {
        Self::Numeric {
            field: field.into(),
            value,
        }
    }

    /// Creates a range node.
    pub fn range(field: impl Into<String>, from: Option<i64>, to: Option<i64>) -> Self {
        Self::Range {
            field: field.into(),
            from,
            to,
        }
    }

    /// Wraps this node with a score multiplier.
    pub fn boosted(self, factor: f32) -> Self {
        Self::Boost {
            node: Box::new(self),
            factor,
        }
    }

    /// Wraps this node with per-document boost fields.
    pub fn with_boost_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BoostFields {
            node: Box::new(self),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Joins nodes into a boolean composite where every node has the given occurrence.
    ///
    /// Returns `None` for an empty input. A single node is still wrapped, so the shape of
    /// the result does not depend on how many nodes were joined.
    pub fn join(nodes: Vec<Self>, occur: Occur) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }
        Some(Self::Bool(
            nodes
                .into_iter()
                .map(|node| Clause { occur, node })
                .collect(),
        ))
    }

    /// Joins nodes with `Must` occurrence.
    pub fn all(nodes: Vec<Self>) -> Option<Self> {
        Self::join(nodes, Occur::Must)
    }

    /// Joins nodes with `Should` occurrence.
    pub fn any(nodes: Vec<Self>) -> Option<Self> {
        Self::join(nodes, Occur::Should)
    }

    /// Returns the node itself for a single input, a `Should` composite for several, and
    /// `None` for none.
    pub fn any_or_single(mut nodes: Vec<Self>) -> Option<Self> {
        if nodes.len() == 1 {
            return nodes.pop();
        }
        Self::any(nodes)
    }

    /// Returns the clauses when this node is a boolean composite.
    pub fn clauses(&self) -> Option<&[Clause]> {
        match self {
            Self::Bool(clauses) => Some(clauses),
            _ => None,
        }
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term { field, value } => writeln!(f, "{prefix}Term({field}, {value:?})"),
            Self::Fuzzy {
                field,
                value,
                max_edits,
            } => writeln!(f, "{prefix}Fuzzy({field}, {value:?}, ~{max_edits})"),
            Self::Numeric { field, value } => writeln!(f, "{prefix}Numeric({field}, {value})"),
            Self::Range { field, from, to } => {
                writeln!(f, "{prefix}Range({field}, {from:?}..={to:?})")
            }
            Self::Bool(clauses) => {
                writeln!(f, "{prefix}Bool")?;
                for clause in clauses {
                    let occur = match clause.occur {
                        Occur::Must => "must",
                        Occur::Should => "should",
                    };
                    writeln!(f, "{prefix}  {occur}:")?;
                    clause.node.fmt_tree(f, indent + 2)?;
                }
                Ok(())
            }
            Self::Boost { node, factor } => {
                writeln!(f, "{prefix}Boost({factor:?})")?;
                node.fmt_tree(f, indent + 1)
            }
            Self::BoostFields { node, fields } => {
                writeln!(f, "{prefix}BoostFields({})", fields.join(", "))?;
                node.fmt_tree(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_empty_is_none() {
        assert_eq!(QueryNode::all(vec![]), None);
        assert_eq!(QueryNode::any(vec![]), None);
    }

    #[test]
    fn join_single_keeps_composite() {
        let joined = QueryNode::all(vec![QueryNode::term("brand", "nike")]).unwrap();
        assert_eq!(
            joined,
            QueryNode::Bool(vec![Clause {
                occur: Occur::Must,
                node: QueryNode::term("brand", "nike"),
            }])
        );
    }

    #[test]
    fn any_or_single_unwraps_one() {
        let single = QueryNode::any_or_single(vec![QueryNode::numeric("shopId", 10)]);
        assert_eq!(single, Some(QueryNode::numeric("shopId", 10)));

        let many = QueryNode::any_or_single(vec![
            QueryNode::numeric("shopId", 10),
            QueryNode::numeric("shopId", 20),
        ])
        .unwrap();
        assert_eq!(many.clauses().unwrap().len(), 2);
        assert!(
            many.clauses()
                .unwrap()
                .iter()
                .all(|c| c.occur == Occur::Should)
        );
    }

    #[test]
    fn join_does_not_flatten() {
        let inner = QueryNode::all(vec![QueryNode::term("a", "1")]).unwrap();
        let outer = QueryNode::all(vec![inner.clone(), QueryNode::term("b", "2")]).unwrap();
        assert_eq!(outer.clauses().unwrap()[0].node, inner);
    }

    #[test]
    fn tree_display_lists_occurrences() {
        let node = QueryNode::all(vec![QueryNode::numeric("shopId", 10)]).unwrap();
        let rendered = node.to_string();
        assert!(rendered.starts_with("Bool\n"));
        assert!(rendered.contains("must:"));
        assert!(rendered.contains("Numeric(shopId, 10)"));
    }
}
