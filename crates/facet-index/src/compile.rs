//! Query compiler.
//!
//! Lowers [`QueryNode`] trees into Tantivy queries against a [`CatalogSchema`]. A node
//! that targets a field the schema does not have, or a field of the wrong kind, compiles
//! to a query that matches nothing, so a missing facet never widens the result set.

use std::ops::Bound;

use facet_query::{Occur, QueryNode};
use tantivy::{
    Term,
    query::{
        AllQuery, BooleanQuery, BoostQuery, EmptyQuery, FuzzyTermQuery, Occur as TantivyOccur,
        Query, RangeQuery, TermQuery,
    },
    schema::{Field, IndexRecordOption},
    tokenizer::{TextAnalyzer, TokenStream},
};

use crate::schema::{CatalogSchema, FieldKind};

/// Highest edit distance the fuzzy automaton supports.
const MAX_FUZZY_EDITS: u8 = 2;

/// Compiles query nodes into Tantivy queries.
pub struct QueryCompiler<'a> {
    /// Schema of the target index.
    schema: &'a CatalogSchema,
    /// Stemmer applied to values matched against stem fields.
    stemmer: TextAnalyzer,
}

impl<'a> QueryCompiler<'a> {
    /// Creates a compiler for the given schema.
    pub fn new(schema: &'a CatalogSchema, stemmer: TextAnalyzer) -> Self {
        Self { schema, stemmer }
    }

    /// Compiles an optional query. An absent query matches every document.
    pub fn compile(&mut self, node: Option<&QueryNode>) -> Box<dyn Query> {
        match node {
            Some(node) => self.compile_node(node),
            None => Box::new(AllQuery),
        }
    }

    /// Compiles one node.
    fn compile_node(&mut self, node: &QueryNode) -> Box<dyn Query> {
        match node {
            QueryNode::Term { field, value } => self.compile_term(field, value, None),
            QueryNode::Fuzzy {
                field,
                value,
                max_edits,
            } => self.compile_term(field, value, Some(*max_edits)),
            QueryNode::Numeric { field, value } => self.compile_numeric(field, *value),
            QueryNode::Range { field, from, to } => self.compile_range(field, *from, *to),
            QueryNode::Bool(clauses) => {
                let subqueries = clauses
                    .iter()
                    .map(|clause| {
                        let occur = match clause.occur {
                            Occur::Must => TantivyOccur::Must,
                            Occur::Should => TantivyOccur::Should,
                        };
                        (occur, self.compile_node(&clause.node))
                    })
                    .collect();
                Box::new(BooleanQuery::new(subqueries))
            }
            QueryNode::Boost { node, factor } => {
                Box::new(BoostQuery::new(self.compile_node(node), *factor))
            }
            // Boost fields only affect scoring; see `boost_fields`.
            QueryNode::BoostFields { node, .. } => self.compile_node(node),
        }
    }

    /// Compiles an exact or fuzzy token match.
    fn compile_term(&mut self, name: &str, value: &str, fuzzy: Option<u8>) -> Box<dyn Query> {
        let Some((field, kind)) = self.schema.field(name) else {
            return Box::new(EmptyQuery);
        };
        let term = match kind {
            FieldKind::Text | FieldKind::Keyword => Term::from_field_text(field, value),
            FieldKind::Stem => Term::from_field_text(field, &self.stem(value)),
            FieldKind::Integer => match value.parse::<i64>() {
                Ok(number) if fuzzy.is_none() => Term::from_field_i64(field, number),
                _ => return Box::new(EmptyQuery),
            },
            FieldKind::Boost => return Box::new(EmptyQuery),
        };
        match fuzzy {
            Some(edits) => Box::new(FuzzyTermQuery::new(
                term,
                edits.min(MAX_FUZZY_EDITS),
                true,
            )),
            None => Box::new(TermQuery::new(term, record_option(kind))),
        }
    }

    /// Compiles an integer equality match.
    fn compile_numeric(&self, name: &str, value: i64) -> Box<dyn Query> {
        match self.schema.field(name) {
            Some((field, FieldKind::Integer)) => Box::new(TermQuery::new(
                Term::from_field_i64(field, value),
                IndexRecordOption::Basic,
            )),
            Some((field, kind @ (FieldKind::Keyword | FieldKind::Text))) => Box::new(
                TermQuery::new(text_term(field, value), record_option(kind)),
            ),
            _ => Box::new(EmptyQuery),
        }
    }

    /// Compiles an inclusive integer range.
    fn compile_range(&self, name: &str, from: Option<i64>, to: Option<i64>) -> Box<dyn Query> {
        match self.schema.field(name) {
            Some((_, FieldKind::Integer)) => Box::new(RangeQuery::new_i64_bounds(
                name.to_string(),
                bound(from),
                bound(to),
            )),
            _ => Box::new(EmptyQuery),
        }
    }

    /// Runs a value through the stemmer, keeping it unchanged when nothing is left.
    fn stem(&mut self, value: &str) -> String {
        let mut stream = self.stemmer.token_stream(value);
        let mut tokens = Vec::new();
        while let Some(token) = stream.next() {
            tokens.push(token.text.clone());
        }
        if tokens.is_empty() {
            value.to_string()
        } else {
            tokens.join(" ")
        }
    }
}

/// Returns the names of every boost field referenced anywhere in the tree.
pub fn boost_fields(node: &QueryNode) -> Vec<String> {
    let mut out = Vec::new();
    collect_boost_fields(node, &mut out);
    out
}

/// Depth-first boost field collection.
fn collect_boost_fields(node: &QueryNode, out: &mut Vec<String>) {
    match node {
        QueryNode::BoostFields { node, fields } => {
            for field in fields {
                if !out.contains(field) {
                    out.push(field.clone());
                }
            }
            collect_boost_fields(node, out);
        }
        QueryNode::Boost { node, .. } => collect_boost_fields(node, out),
        QueryNode::Bool(clauses) => {
            for clause in clauses {
                collect_boost_fields(&clause.node, out);
            }
        }
        QueryNode::Term { .. }
        | QueryNode::Fuzzy { .. }
        | QueryNode::Numeric { .. }
        | QueryNode::Range { .. } => {}
    }
}

/// Postings detail needed to score a term on a field of the given kind.
fn record_option(kind: FieldKind) -> IndexRecordOption {
    match kind {
        FieldKind::Text | FieldKind::Stem => IndexRecordOption::WithFreqs,
        FieldKind::Keyword | FieldKind::Integer | FieldKind::Boost => IndexRecordOption::Basic,
    }
}

/// Integer value as a text term.
fn text_term(field: Field, value: i64) -> Term {
    Term::from_field_text(field, &value.to_string())
}

/// Optional bound as an inclusive range bound.
fn bound(value: Option<i64>) -> Bound<i64> {
    value.map_or(Bound::Unbounded, Bound::Included)
}

#[cfg(test)]
mod tests {
    use tantivy::tokenizer::Language;

    use super::*;
    use crate::{
        analyzer::stem_analyzer,
        schema::IndexKind,
    };

    fn schema() -> CatalogSchema {
        CatalogSchema::new(IndexKind::Product, ["facet_color", "facet_price_10_EUR_range"])
    }

    fn compile(schema: &CatalogSchema, node: Option<&QueryNode>) -> String {
        let mut compiler = QueryCompiler::new(schema, stem_analyzer(Language::English));
        format!("{:?}", compiler.compile(node))
    }

    #[test]
    fn absent_query_matches_everything() {
        assert!(compile(&schema(), None).contains("AllQuery"));
    }

    #[test]
    fn unknown_field_matches_nothing() {
        let schema = schema();
        assert!(compile(&schema, Some(&QueryNode::term("facet_size", "xl"))).contains("EmptyQuery"));
        assert!(compile(&schema, Some(&QueryNode::range("name", Some(1), None))).contains("EmptyQuery"));
        assert!(
            compile(&schema, Some(&QueryNode::fuzzy("featured_boost", "x", 1)))
                .contains("EmptyQuery")
        );
    }

    #[test]
    fn known_fields_compile_to_term_queries() {
        let schema = schema();
        assert!(compile(&schema, Some(&QueryNode::term("facet_color", "red"))).contains("TermQuery"));
        assert!(compile(&schema, Some(&QueryNode::numeric("shopId", 10))).contains("TermQuery"));
        assert!(compile(&schema, Some(&QueryNode::fuzzy("name", "shoe", 5))).contains("FuzzyTermQuery"));
        assert!(
            compile(
                &schema,
                Some(&QueryNode::range("facet_price_10_EUR_range", Some(100), None))
            )
            .contains("RangeQuery")
        );
    }

    #[test]
    fn stems_values_for_stem_fields() {
        let schema = schema();
        let mut compiler = QueryCompiler::new(&schema, stem_analyzer(Language::English));
        assert_eq!(compiler.stem("running"), "run");
        assert_eq!(compiler.stem("..."), "...");
    }

    #[test]
    fn collects_nested_boost_fields_once() {
        let inner = QueryNode::term("name", "shoe").with_boost_fields(["rank_boost"]);
        let node = QueryNode::all(vec![inner.clone(), inner.boosted(2.0)])
            .unwrap()
            .with_boost_fields(["featured_boost", "rank_boost"]);
        assert_eq!(boost_fields(&node), vec!["featured_boost", "rank_boost"]);
        assert!(boost_fields(&QueryNode::numeric("shopId", 1)).is_empty());
    }
}
