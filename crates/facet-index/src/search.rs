//! Counting and boosted search over one catalogue index.

use facet_nav::{ProductHit, fields};
use facet_query::QueryNode;
use tantivy::{
    DocAddress, DocId, Index, IndexReader, Score, Searcher, SegmentReader, TantivyDocument,
    collector::{Count, TopDocs},
    columnar::Column,
    query::Query,
    schema::Value,
    tokenizer::{Language, TextAnalyzer},
};

use crate::{
    IndexError,
    analyzer::stem_analyzer,
    compile::{QueryCompiler, boost_fields},
    schema::CatalogSchema,
};

/// A scored catalogue document.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogHit {
    /// Document identifier: product id or SKU id.
    pub id: i64,
    /// Owning product; equal to `id` for products.
    pub product_id: Option<i64>,
    /// First stored name, if any.
    pub name: Option<String>,
    /// Relevance score including boost field values.
    pub score: f32,
}

impl CatalogHit {
    /// The hit as a product reference for narrowing SKU queries.
    pub fn product_hit(&self) -> ProductHit {
        ProductHit {
            id: self.product_id.unwrap_or(self.id),
            score: self.score,
        }
    }
}

/// A committed, searchable catalogue index.
pub struct IndexPart {
    /// Field handles.
    schema: CatalogSchema,
    /// Reader over the committed index.
    reader: IndexReader,
    /// Stemmer used for values matched against stem fields.
    stemmer: TextAnalyzer,
}

impl IndexPart {
    /// Opens a reader on a committed index.
    pub(crate) fn open(
        schema: CatalogSchema,
        index: &Index,
        language: Language,
    ) -> Result<Self, IndexError> {
        let reader = index
            .reader()
            .map_err(|e| IndexError::create(schema.kind().name(), &e))?;
        Ok(Self {
            schema,
            reader,
            stemmer: stem_analyzer(language),
        })
    }

    /// Field handles of this index.
    pub fn schema(&self) -> &CatalogSchema {
        &self.schema
    }

    /// Number of indexed documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Compiles a query against this index.
    pub fn compile(&self, query: Option<&QueryNode>) -> Box<dyn Query> {
        QueryCompiler::new(&self.schema, self.stemmer.clone()).compile(query)
    }

    /// Counts documents matching a query. An absent query matches every document.
    pub fn count(&self, query: Option<&QueryNode>) -> Result<u64, IndexError> {
        let compiled = self.compile(query);
        let searcher = self.reader.searcher();
        let count = searcher
            .search(&*compiled, &Count)
            .map_err(|e| IndexError::search(&e))?;
        Ok(count as u64)
    }

    /// Returns the best `limit` hits for a query, highest score first.
    ///
    /// Every boost field referenced in the query adds its per-document value to the
    /// relevance score. Documents without a value contribute nothing.
    pub fn search(
        &self,
        query: Option<&QueryNode>,
        limit: usize,
    ) -> Result<Vec<CatalogHit>, IndexError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let compiled = self.compile(query);
        let boosts = query.map(boost_fields).unwrap_or_default();

        let collector =
            TopDocs::with_limit(limit).tweak_score(move |segment: &SegmentReader| {
                let columns: Vec<Column<f64>> = boosts
                    .iter()
                    .filter_map(|name| segment.fast_fields().f64(name).ok())
                    .collect();
                move |doc: DocId, score: Score| {
                    let extra: f64 = columns.iter().filter_map(|column| column.first(doc)).sum();
                    score + extra as Score
                }
            });

        let searcher = self.reader.searcher();
        let top = searcher
            .search(&*compiled, &collector)
            .map_err(|e| IndexError::search(&e))?;
        top.into_iter()
            .map(|(score, address)| self.to_hit(&searcher, address, score))
            .collect()
    }

    /// Reads the stored fields of a hit.
    fn to_hit(
        &self,
        searcher: &Searcher,
        address: DocAddress,
        score: Score,
    ) -> Result<CatalogHit, IndexError> {
        let doc: TantivyDocument = searcher
            .doc(address)
            .map_err(|e| IndexError::search(&e))?;
        let integer = |name: &str| {
            let (field, _) = self.schema.field(name)?;
            doc.get_first(field).and_then(|value| value.as_i64())
        };
        let id = doc
            .get_first(self.schema.id_field())
            .and_then(|value| value.as_i64())
            .ok_or_else(|| IndexError::Search(format!("document {address:?} has no id")))?;
        let name = self
            .schema
            .field(fields::NAME)
            .and_then(|(field, _)| doc.get_first(field))
            .and_then(|value| value.as_str())
            .map(str::to_string);
        Ok(CatalogHit {
            id,
            product_id: integer(fields::PRODUCT_ID),
            name,
            score,
        })
    }
}
