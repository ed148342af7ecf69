//! Document-store access for TEBS admin tooling
//!
//! Defines the [`DocumentStore`] seam the administrative operations run
//! against, plus two implementations:
//! - [`FirestoreStore`], the Firestore REST v1 backend used in production
//! - [`MemoryStore`], an in-memory backend for tests and local dry runs
//!
//! Documents are externally owned; this crate only lists them, applies
//! partial field updates, and enumerates top-level collections.
//!
//! # Example
//!
//! ```rust,ignore
//! use tebs_store::{CollectionPath, DocumentStore, FirestoreStore};
//!
//! # async fn example(key: yup_oauth2::ServiceAccountKey) -> Result<(), tebs_store::StoreError> {
//! let store = FirestoreStore::connect(key, "(default)").await?;
//! let projects = CollectionPath::parse("projects/tebs-erl/projects/2025/projects")?;
//! let documents = store.list_documents(&projects).await?;
//! println!("{} documents", documents.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod firestore;
pub mod memory;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use store::DocumentStore;
pub use types::{CollectionPath, Document, DocumentPath};
