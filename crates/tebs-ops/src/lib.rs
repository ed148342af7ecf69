//! Administrative operations over the TEBS document store
//!
//! Two fixed passes, both generic over [`tebs_store::DocumentStore`]:
//! - [`tag_subsidiary`] sets `subsidiary = "ERL"` on every document of the
//!   given collections, counting successes
//! - [`list_collections`] enumerates top-level collection identifiers

pub mod error;
pub mod list;
pub mod tag;

pub use error::OpError;
pub use list::list_collections;
pub use tag::{
    tag_field, tag_subsidiary, FailurePolicy, TagFailure, TagReport, SUBSIDIARY_FIELD,
    SUBSIDIARY_TAG,
};
