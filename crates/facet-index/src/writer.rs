//! Builds in-memory catalogue indexes from catalogue documents.

use std::slice;

use chrono::NaiveDate;
use facet_nav::date_to_millis;
use serde_json::Value;
use tantivy::{Index, IndexWriter, TantivyDocument, tokenizer::Language};
use tracing::{debug, warn};

use crate::{
    IndexError,
    analyzer::{parse_language, register_analyzers},
    catalog::{Document, field_names},
    schema::{CatalogSchema, FieldKind, IndexKind},
    search::IndexPart,
};

/// Heap size for the index writer (50 MB).
const HEAP_SIZE: usize = 50_000_000;

/// Catalogues are small; one indexing thread keeps a single segment in document order.
const WRITER_THREADS: usize = 1;

/// Writes catalogue documents into a fresh in-memory index.
pub struct CatalogWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: IndexWriter,
    /// Field handles.
    schema: CatalogSchema,
    /// Stemmer language of the index.
    language: Language,
}

impl CatalogWriter {
    /// Creates an empty in-memory index with the given schema.
    pub fn create_in_ram(schema: CatalogSchema, stemmer: &str) -> Result<Self, IndexError> {
        let language = parse_language(stemmer)?;
        let index = Index::create_in_ram(schema.schema().clone());
        register_analyzers(&index, stemmer)?;
        let writer = index
            .writer_with_num_threads(WRITER_THREADS, HEAP_SIZE)
            .map_err(|e| IndexError::create(schema.kind().name(), &e))?;
        Ok(Self {
            index,
            writer,
            schema,
            language,
        })
    }

    /// Adds a catalogue document.
    ///
    /// Returns `false` when the document was skipped because it lacks an identifier or
    /// holds a value of the wrong type.
    pub fn add_document(&mut self, source: &Document) -> Result<bool, IndexError> {
        match to_document(&self.schema, source) {
            Ok(doc) => {
                self.writer
                    .add_document(doc)
                    .map_err(|e| IndexError::write(&e))?;
                Ok(true)
            }
            Err(reason) => {
                warn!(index = self.schema.kind().name(), %reason, "skipping catalog document");
                Ok(false)
            }
        }
    }

    /// Commits the staged documents and opens the index for searching.
    pub fn commit(mut self) -> Result<IndexPart, IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        IndexPart::open(self.schema, &self.index, self.language)
    }
}

/// Builds a searchable index of one kind from catalogue documents.
///
/// Per-scope fields are discovered from the documents; other unknown fields are ignored.
pub fn build_part(
    kind: IndexKind,
    documents: &[Document],
    stemmer: &str,
) -> Result<IndexPart, IndexError> {
    let names = field_names(documents);
    let schema = CatalogSchema::new(kind, names.iter().copied());
    for name in names.iter().filter(|name| schema.field(name).is_none()) {
        debug!(index = kind.name(), field = *name, "ignoring unknown field");
    }

    let mut writer = CatalogWriter::create_in_ram(schema, stemmer)?;
    let mut added = 0_usize;
    for doc in documents {
        if writer.add_document(doc)? {
            added += 1;
        }
    }
    debug!(
        index = kind.name(),
        added,
        skipped = documents.len() - added,
        "indexed catalog documents"
    );
    writer.commit()
}

/// Converts a catalogue document, or explains why it cannot be indexed.
fn to_document(schema: &CatalogSchema, source: &Document) -> Result<TantivyDocument, String> {
    let id_name = schema.kind().id_field();
    if source.get(id_name).and_then(integer_value).is_none() {
        return Err(format!("missing or invalid {id_name}"));
    }

    let mut doc = TantivyDocument::new();
    for (name, value) in source {
        let Some((field, kind)) = schema.field(name) else {
            continue;
        };
        for item in values(value) {
            let invalid = || format!("invalid value {item} for {name}");
            match kind {
                FieldKind::Text | FieldKind::Keyword | FieldKind::Stem => {
                    let text = text_value(item).ok_or_else(invalid)?;
                    doc.add_text(field, &text);
                    if let Some(stem) = schema.stem_of(name) {
                        doc.add_text(stem, &text);
                    }
                }
                FieldKind::Integer => doc.add_i64(field, integer_value(item).ok_or_else(invalid)?),
                FieldKind::Boost => doc.add_f64(field, item.as_f64().ok_or_else(invalid)?),
            }
        }
    }
    Ok(doc)
}

/// The items of a multi-valued field; `null` has none.
fn values(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        Value::Null => &[],
        other => slice::from_ref(other),
    }
}

/// Text form of a scalar.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integer form of a scalar. Strings may hold an integer or a `YYYY-MM-DD` date, which
/// becomes epoch milliseconds.
fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => {
            let text = text.trim();
            text.parse().ok().or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .map(date_to_millis)
            })
        }
        _ => None,
    }
}
