//! Path and document types
//!
//! Firestore-style hierarchical paths: collections and documents alternate,
//! so a collection path always has an odd number of segments and a document
//! path an even number. Parsing validates parity and non-emptiness; invalid
//! paths are a typed error, never a panic.

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::fmt;

/// Path to a named, possibly nested, document collection
///
/// Examples: `2025` (top-level), `projects/tebs-erl/projects/2025/projects`
/// (nested).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    path: String,
}

impl CollectionPath {
    /// Parse and validate a collection path
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidPath`] on empty segments or an even
    /// segment count.
    pub fn parse(path: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.split('/').any(|segment| segment.is_empty()) {
            return Err(StoreError::invalid_path(path, "empty segment"));
        }
        if path.split('/').count() % 2 == 0 {
            return Err(StoreError::invalid_path(
                path,
                "collection paths have an odd number of segments",
            ));
        }
        Ok(Self { path })
    }

    /// The path as a `/`-joined string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }

    /// Path of the document with `id` in this collection
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidPath`] if `id` is empty or contains `/`.
    pub fn doc(&self, id: &str) -> Result<DocumentPath, StoreError> {
        if id.is_empty() || id.contains('/') {
            return Err(StoreError::invalid_path(
                id,
                "document id must be a single non-empty segment",
            ));
        }
        Ok(DocumentPath {
            path: format!("{}/{}", self.path, id),
        })
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Path identifying one document within the collection namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    path: String,
}

impl DocumentPath {
    /// Parse and validate a document path
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidPath`] on empty segments or an odd
    /// segment count.
    pub fn parse(path: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.split('/').any(|segment| segment.is_empty()) {
            return Err(StoreError::invalid_path(path, "empty segment"));
        }
        if path.split('/').count() % 2 != 0 {
            return Err(StoreError::invalid_path(
                path,
                "document paths have an even number of segments",
            ));
        }
        Ok(Self { path })
    }

    /// The path as a `/`-joined string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The document id (final segment)
    #[must_use]
    pub fn id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// The collection this document belongs to
    #[must_use]
    pub fn parent(&self) -> CollectionPath {
        // even segment count minus the id leaves a valid collection path
        let end = self.path.len() - self.id().len() - 1;
        CollectionPath {
            path: self.path[..end].to_string(),
        }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// An externally-owned document: its path plus the field map fetched with it
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path within the collection namespace
    pub path: DocumentPath,
    /// Field map at fetch time
    pub fields: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_path_accepts_odd_segments() {
        assert!(CollectionPath::parse("2025").is_ok());
        assert!(CollectionPath::parse("projects/tebs-erl/projects/2025/projects").is_ok());
    }

    #[test]
    fn collection_path_rejects_even_segments() {
        let err = CollectionPath::parse("projects/tebs-erl").unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath { .. }));
    }

    #[test]
    fn collection_path_rejects_empty_segments() {
        assert!(CollectionPath::parse("").is_err());
        assert!(CollectionPath::parse("projects//projects").is_err());
    }

    #[test]
    fn doc_appends_single_segment() {
        let collection = CollectionPath::parse("2025").unwrap();
        let doc = collection.doc("p1").unwrap();
        assert_eq!(doc.as_str(), "2025/p1");
        assert_eq!(doc.id(), "p1");
    }

    #[test]
    fn doc_rejects_nested_id() {
        let collection = CollectionPath::parse("2025").unwrap();
        assert!(collection.doc("a/b").is_err());
        assert!(collection.doc("").is_err());
    }

    #[test]
    fn document_path_parity() {
        assert!(DocumentPath::parse("2025/p1").is_ok());
        assert!(DocumentPath::parse("2025").is_err());
    }

    #[test]
    fn parent_drops_id() {
        let doc = DocumentPath::parse("projects/tebs-erl/projects/2025/projects/p1").unwrap();
        assert_eq!(
            doc.parent().as_str(),
            "projects/tebs-erl/projects/2025/projects"
        );
    }

    #[test]
    fn display_round_trips() {
        let collection = CollectionPath::parse("2025").unwrap();
        assert_eq!(collection.to_string(), "2025");
        let doc = collection.doc("p1").unwrap();
        assert_eq!(doc.to_string(), "2025/p1");
    }
}
