//! Catalogue index schemas.
//!
//! Products and SKUs live in separate indexes. Each schema declares the standard fields
//! the navigation builders target, plus per-scope fields discovered in the catalogue
//! documents:
//! - `shopInStockFlag0` / `shopInStockFlag1`: integer, customer shop ids
//! - `facet_price_<shop>_<currency>_range`: integer, prices in cents
//! - `facet_<code>`: keyword, attribute values
//! - `*_boost`: fast float, added to the score by the boost overlay

use std::collections::HashMap;

use facet_nav::{PRODUCT_BOOST_FIELDS, SKU_BOOST_FIELDS, fields};
use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, Schema, SchemaBuilder, TextFieldIndexing,
    TextOptions,
};

use crate::analyzer::{KEYWORD_TOKENIZER, STEM_TOKENIZER, TEXT_TOKENIZER};

/// How a field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Analysed text: lowercased words.
    Text,
    /// Stemmed text, filled from a source field.
    Stem,
    /// The whole lowercased value as one token.
    Keyword,
    /// Indexed, fast, multi-valued `i64`.
    Integer,
    /// Fast `f64` score contribution.
    Boost,
}

/// Which catalogue index a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// One document per product.
    Product,
    /// One document per SKU.
    Sku,
}

impl IndexKind {
    /// Name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Sku => "sku",
        }
    }

    /// Field holding the document identifier.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Product => fields::PRODUCT_ID,
            Self::Sku => fields::SKU_ID,
        }
    }

    /// Standard fields of this index, without stem companions.
    fn standard_fields(self) -> Vec<(&'static str, FieldKind)> {
        use FieldKind::{Boost, Integer, Keyword, Text};

        let mut out = match self {
            Self::Product => vec![
                (fields::PRODUCT_ID, Integer),
                (fields::NAME, Text),
                (fields::DISPLAY_NAME, Text),
                (fields::BRAND, Keyword),
                (fields::CATEGORY_NAME, Text),
                (fields::TYPE, Text),
                (fields::CODE, Keyword),
                (fields::MANUFACTURER_CODE, Keyword),
                (fields::SKU_CODE, Keyword),
                (fields::SKU_MANUFACTURER_CODE, Keyword),
                (fields::ATTRIBUTE_SEARCH_PRIMARY, Text),
                (fields::ATTRIBUTE_SEARCH_PHRASE, Text),
                (fields::ATTRIBUTE_SEARCH, Text),
                (fields::TAG, Keyword),
                (fields::SHOP, Integer),
                (fields::SHOP_HAS_PRICE, Integer),
                (fields::CATEGORY, Integer),
                (fields::CATEGORY_INC_PARENTS, Integer),
                (fields::CREATED, Integer),
            ],
            Self::Sku => vec![
                (fields::SKU_ID, Integer),
                (fields::PRODUCT_ID, Integer),
                (fields::NAME, Text),
                (fields::DISPLAY_NAME, Text),
                (fields::BRAND, Keyword),
                (fields::CODE, Keyword),
                (fields::MANUFACTURER_CODE, Keyword),
                (fields::ATTRIBUTE_SEARCH_PRIMARY, Text),
                (fields::ATTRIBUTE_SEARCH_PHRASE, Text),
                (fields::ATTRIBUTE_SEARCH, Text),
            ],
        };
        let boosts = match self {
            Self::Product => PRODUCT_BOOST_FIELDS,
            Self::Sku => SKU_BOOST_FIELDS,
        };
        out.extend(boosts.iter().map(|name| (*name, Boost)));
        out
    }

    /// Pairs of (source field, stem field) filled at index time.
    fn stem_pairs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Product => &[
                (fields::NAME, fields::NAME_STEM),
                (fields::DISPLAY_NAME, fields::DISPLAY_NAME_STEM),
                (fields::CATEGORY_NAME, fields::CATEGORY_NAME_STEM),
                (fields::TYPE, fields::TYPE_STEM),
                (fields::CODE, fields::CODE_STEM),
                (fields::MANUFACTURER_CODE, fields::MANUFACTURER_CODE_STEM),
                (fields::SKU_CODE, fields::SKU_CODE_STEM),
                (fields::SKU_MANUFACTURER_CODE, fields::SKU_MANUFACTURER_CODE_STEM),
            ],
            Self::Sku => &[
                (fields::NAME, fields::NAME_STEM),
                (fields::DISPLAY_NAME, fields::DISPLAY_NAME_STEM),
                (fields::CODE, fields::CODE_STEM),
                (fields::MANUFACTURER_CODE, fields::MANUFACTURER_CODE_STEM),
            ],
        }
    }
}

/// Returns the kind of a per-scope field, or `None` when the name is not one.
pub fn classify_dynamic(name: &str) -> Option<FieldKind> {
    if name.ends_with("_boost") {
        Some(FieldKind::Boost)
    } else if name.starts_with(fields::SHOP_IN_STOCK_FLAG)
        || (name.starts_with("facet_price_") && name.ends_with("_range"))
    {
        Some(FieldKind::Integer)
    } else if name.len() > fields::FACET_PREFIX.len() && name.starts_with(fields::FACET_PREFIX) {
        Some(FieldKind::Keyword)
    } else {
        None
    }
}

/// Handles to all fields of a catalogue index.
#[derive(Debug, Clone)]
pub struct CatalogSchema {
    /// Which index this is.
    kind: IndexKind,
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Field handle and kind by name.
    fields: HashMap<String, (Field, FieldKind)>,
    /// Stem companion by source field name.
    stems: HashMap<String, Field>,
    /// Identifier field.
    id: Field,
}

impl CatalogSchema {
    /// Creates the schema for an index, adding the given per-scope fields.
    ///
    /// Names that are standard fields or not per-scope fields are ignored.
    pub fn new<'a>(kind: IndexKind, dynamic: impl IntoIterator<Item = &'a str>) -> Self {
        let mut builder = Schema::builder();
        let mut fields = HashMap::new();

        let id_name = kind.id_field();
        let id = add_field(&mut builder, id_name, FieldKind::Integer, true);
        fields.insert(id_name.to_string(), (id, FieldKind::Integer));

        for (name, field_kind) in kind.standard_fields() {
            if name == id_name {
                continue;
            }
            let stored = name == fields::PRODUCT_ID;
            let field = add_field(&mut builder, name, field_kind, stored);
            fields.insert(name.to_string(), (field, field_kind));
        }

        let mut stems = HashMap::new();
        for (source, stem) in kind.stem_pairs() {
            let field = add_field(&mut builder, stem, FieldKind::Stem, false);
            fields.insert((*stem).to_string(), (field, FieldKind::Stem));
            stems.insert((*source).to_string(), field);
        }

        let mut extra: Vec<&str> = dynamic.into_iter().collect();
        extra.sort_unstable();
        extra.dedup();
        for name in extra {
            if fields.contains_key(name) {
                continue;
            }
            if let Some(field_kind) = classify_dynamic(name) {
                let field = add_field(&mut builder, name, field_kind, false);
                fields.insert(name.to_string(), (field, field_kind));
            }
        }

        let schema = builder.build();
        Self {
            kind,
            schema,
            fields,
            stems,
            id,
        }
    }

    /// Which index this schema describes.
    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the handle and kind of a field.
    pub fn field(&self, name: &str) -> Option<(Field, FieldKind)> {
        self.fields.get(name).copied()
    }

    /// Returns the stem companion of a source field.
    pub fn stem_of(&self, name: &str) -> Option<Field> {
        self.stems.get(name).copied()
    }

    /// Identifier field.
    pub fn id_field(&self) -> Field {
        self.id
    }
}

/// Adds one field with the options for its kind.
fn add_field(builder: &mut SchemaBuilder, name: &str, kind: FieldKind, stored: bool) -> Field {
    match kind {
        FieldKind::Text => builder.add_text_field(
            name,
            text_options(TEXT_TOKENIZER, IndexRecordOption::WithFreqsAndPositions).set_stored(),
        ),
        FieldKind::Stem => builder.add_text_field(
            name,
            text_options(STEM_TOKENIZER, IndexRecordOption::WithFreqs),
        ),
        FieldKind::Keyword => builder.add_text_field(
            name,
            text_options(KEYWORD_TOKENIZER, IndexRecordOption::Basic).set_stored(),
        ),
        FieldKind::Integer if stored => builder.add_i64_field(name, INDEXED | FAST | STORED),
        FieldKind::Integer => builder.add_i64_field(name, INDEXED | FAST),
        FieldKind::Boost => builder.add_f64_field(name, FAST),
    }
}

/// Text options using the given tokenizer.
fn text_options(tokenizer: &str, record: IndexRecordOption) -> TextOptions {
    TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(tokenizer)
            .set_index_option(record),
    )
}
