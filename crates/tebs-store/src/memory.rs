//! In-memory document store
//!
//! Backs operation tests and local dry runs. Mirrors the remote store's
//! observable behavior for the calls the admin tooling makes: listing
//! returns direct children only, updates merge into existing fields and
//! fail on missing documents.

use crate::error::StoreError;
use crate::store::DocumentStore;
use crate::types::{CollectionPath, Document, DocumentPath};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Mutex-guarded map of document path to field map
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, Map<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, replacing any existing fields
    pub fn insert(&self, doc: &DocumentPath, fields: Map<String, Value>) {
        self.documents.lock().insert(doc.as_str().to_string(), fields);
    }

    /// Current fields of a document, if present
    #[must_use]
    pub fn fields(&self, doc: &DocumentPath) -> Option<Map<String, Value>> {
        self.documents.lock().get(doc.as_str()).cloned()
    }

    /// Remove a document; returns whether it existed
    pub fn remove(&self, doc: &DocumentPath) -> bool {
        self.documents.lock().remove(doc.as_str()).is_some()
    }

    /// Snapshot of every stored document keyed by path
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Map<String, Value>> {
        self.documents.lock().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<Document>, StoreError> {
        let prefix = format!("{}/", collection.as_str());
        let documents = self.documents.lock();
        let mut out = Vec::new();
        for (path, fields) in documents.iter() {
            if let Some(id) = path.strip_prefix(&prefix) {
                // direct children only; deeper matches are subcollection documents
                if !id.contains('/') {
                    out.push(Document {
                        path: collection.doc(id)?,
                        fields: fields.clone(),
                    });
                }
            }
        }
        Ok(out)
    }

    async fn update_fields(
        &self,
        doc: &DocumentPath,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.lock();
        let existing = documents
            .get_mut(doc.as_str())
            .ok_or_else(|| StoreError::NotFound(doc.as_str().to_string()))?;
        for (key, value) in fields {
            existing.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn list_root_collections(&self) -> Result<BTreeSet<String>, StoreError> {
        let documents = self.documents.lock();
        Ok(documents
            .keys()
            .filter_map(|path| path.split('/').next())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn lists_direct_children_only() {
        let store = MemoryStore::new();
        let year = CollectionPath::parse("2025").unwrap();
        store.insert(&year.doc("p1").unwrap(), fields(&[("amount", json!(1200))]));
        store.insert(
            &DocumentPath::parse("2025/p1/invoice/INV-001").unwrap(),
            fields(&[("paymentStatus", json!("Due"))]),
        );

        let docs = store.list_documents(&year).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path.as_str(), "2025/p1");
    }

    #[tokio::test]
    async fn empty_collection_lists_nothing() {
        let store = MemoryStore::new();
        let year = CollectionPath::parse("2024").unwrap();
        let docs = store.list_documents(&year).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn update_merges_into_existing_fields() {
        let store = MemoryStore::new();
        let doc = DocumentPath::parse("2025/p1").unwrap();
        store.insert(&doc, fields(&[("projectTitle", json!("Workshop"))]));

        store
            .update_fields(&doc, &fields(&[("subsidiary", json!("ERL"))]))
            .await
            .unwrap();

        let updated = store.fields(&doc).unwrap();
        assert_eq!(updated.get("subsidiary"), Some(&json!("ERL")));
        assert_eq!(updated.get("projectTitle"), Some(&json!("Workshop")));
    }

    #[tokio::test]
    async fn update_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let doc = DocumentPath::parse("2025/ghost").unwrap();
        let err = store
            .update_fields(&doc, &fields(&[("subsidiary", json!("ERL"))]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn root_collections_are_first_segments() {
        let store = MemoryStore::new();
        store.insert(
            &DocumentPath::parse("projects/tebs-erl").unwrap(),
            Map::new(),
        );
        store.insert(&DocumentPath::parse("2025/p1").unwrap(), Map::new());
        store.insert(&DocumentPath::parse("users/u1").unwrap(), Map::new());

        let roots = store.list_root_collections().await.unwrap();
        let expected: BTreeSet<String> = ["projects", "2025", "users"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(roots, expected);
    }
}
