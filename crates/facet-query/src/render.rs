//! Lucene-style text rendering of query nodes.
//!
//! The rendered form is what shows up in logs and CLI output:
//! `+(brand:nike)^1.0 +shopId:10`, `(name:shoe~2)^4.0`, `price_range:[100 TO *]`.

use crate::{Occur, QueryNode};

/// Characters that carry meaning in Lucene query syntax.
const SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&',
    '/',
];

/// Backslash-escapes query-syntax characters in a term value.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if SPECIAL_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl QueryNode {
    /// Formats the node as a Lucene-style query string.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Term { field, value } => format!("{field}:{}", escape_value(value)),
            Self::Fuzzy {
                field,
                value,
                max_edits,
            } => format!("{field}:{}~{max_edits}", escape_value(value)),
            Self::Numeric { field, value } => format!("{field}:{value}"),
            Self::Range { field, from, to } => format!(
                "{field}:[{} TO {}]",
                from.map_or_else(|| "*".to_string(), |v| v.to_string()),
                to.map_or_else(|| "*".to_string(), |v| v.to_string()),
            ),
            Self::Bool(clauses) => clauses
                .iter()
                .map(|clause| {
                    let prefix = match clause.occur {
                        Occur::Must => "+",
                        Occur::Should => "",
                    };
                    if matches!(clause.node, Self::Bool(_)) {
                        format!("{prefix}({})", clause.node.to_query_string())
                    } else {
                        format!("{prefix}{}", clause.node.to_query_string())
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
            Self::Boost { node, factor } => format!("({})^{factor:?}", node.to_query_string()),
            Self::BoostFields { node, fields } => {
                format!("boost({}, [{}])", node.to_query_string(), fields.join(", "))
            }
        }
    }
}
