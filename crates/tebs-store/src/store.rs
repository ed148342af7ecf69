//! The document-store seam
//!
//! Administrative operations run against this trait rather than a concrete
//! backend, so the same pass works over the remote store and the in-memory
//! one used by tests.

use crate::error::StoreError;
use crate::types::{CollectionPath, Document, DocumentPath};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Access to a hierarchical document store
///
/// # Contract
/// - `list_documents` is a snapshot at fetch time, not a transactional read;
///   concurrent external writers may race with a subsequent update.
/// - `update_fields` is a partial update: exactly the given keys are set,
///   every other field is left untouched.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the live sequence of documents currently in `collection`
    ///
    /// Empty collections yield an empty vec, not an error.
    ///
    /// # Errors
    /// Returns [`StoreError`] on authentication, transport, or service
    /// failures.
    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<Document>, StoreError>;

    /// Set exactly the given fields on `doc`, leaving all others untouched
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the document no longer exists.
    async fn update_fields(
        &self,
        doc: &DocumentPath,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Identifier set of the top-level collections
    async fn list_root_collections(&self) -> Result<BTreeSet<String>, StoreError>;
}
