//! Error types for the facet-index crate.

use std::{io, path::PathBuf};

use facet_nav::NavigationError;
use thiserror::Error;

/// Errors that can occur when building or querying the catalogue index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to create the index.
    #[error("failed to create {index} index: {message}")]
    CreateIndex {
        /// Which index was being created.
        index: &'static str,
        /// Error message.
        message: String,
    },

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// A search failed.
    #[error("search failed: {0}")]
    Search(String),

    /// The catalogue file could not be read or parsed.
    #[error("invalid catalog file {path}: {message}")]
    CatalogFile {
        /// Path to the catalogue file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),
}

impl IndexError {
    /// Creates a `CreateIndex` error from a Tantivy error.
    pub(crate) fn create(index: &'static str, source: &tantivy::TantivyError) -> Self {
        Self::CreateIndex {
            index,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &tantivy::TantivyError) -> Self {
        Self::Search(source.to_string())
    }
}

impl From<IndexError> for NavigationError {
    fn from(err: IndexError) -> Self {
        Self::Count(err.to_string())
    }
}
