//! The field-tagging pass
//!
//! Walks the given collections in order, fetches the live document listing
//! of each (a snapshot at fetch time), and applies a partial update setting
//! one field to a constant value on every document, in stream order. The
//! write is idempotent: re-running produces the same end state. Concurrent
//! external writers race last-write-wins on the tagged field only.

use crate::error::OpError;
use serde_json::{Map, Value};
use tebs_store::{CollectionPath, DocumentPath, DocumentStore, StoreError};

/// Field written by the subsidiary tagging pass
pub const SUBSIDIARY_FIELD: &str = "subsidiary";
/// Constant tag value
pub const SUBSIDIARY_TAG: &str = "ERL";

/// What to do when one document fails to update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failed update and propagate it; documents already
    /// updated stay updated
    #[default]
    Abort,
    /// Record the failure and keep going
    Continue,
}

/// Outcome of a tagging pass
#[derive(Debug, Default)]
pub struct TagReport {
    /// Documents successfully updated across all collections
    pub updated: u64,
    /// Failures recorded under [`FailurePolicy::Continue`]
    pub failures: Vec<TagFailure>,
}

/// One document that could not be updated
#[derive(Debug)]
pub struct TagFailure {
    /// The document that failed
    pub doc: DocumentPath,
    /// Why the update failed
    pub error: StoreError,
}

/// Set `field = value` on every document of the given collections
///
/// Collections are drained to completion one after another; within a
/// collection, documents are updated one at a time in stream order. An
/// empty collection contributes zero and is not an error.
///
/// # Errors
/// - [`OpError::ListFailed`] if a collection cannot be fetched.
/// - [`OpError::UpdateFailed`] if a document update fails under
///   [`FailurePolicy::Abort`]; the partial count is carried in the error.
pub async fn tag_field<S>(
    store: &S,
    collections: &[CollectionPath],
    field: &str,
    value: Value,
    policy: FailurePolicy,
) -> Result<TagReport, OpError>
where
    S: DocumentStore + ?Sized,
{
    let mut patch = Map::new();
    patch.insert(field.to_string(), value);

    let mut report = TagReport::default();
    for collection in collections {
        let documents =
            store
                .list_documents(collection)
                .await
                .map_err(|source| OpError::ListFailed {
                    collection: collection.clone(),
                    source,
                })?;
        tracing::debug!(
            collection = collection.as_str(),
            count = documents.len(),
            "tagging documents"
        );

        for document in documents {
            match store.update_fields(&document.path, &patch).await {
                Ok(()) => report.updated += 1,
                Err(source) => match policy {
                    FailurePolicy::Abort => {
                        return Err(OpError::UpdateFailed {
                            doc: document.path,
                            updated: report.updated,
                            source,
                        });
                    }
                    FailurePolicy::Continue => {
                        tracing::warn!(doc = document.path.as_str(), error = %source, "update failed");
                        report.failures.push(TagFailure {
                            doc: document.path,
                            error: source,
                        });
                    }
                },
            }
        }
    }

    tracing::info!(
        updated = report.updated,
        failures = report.failures.len(),
        "tagging pass complete"
    );
    Ok(report)
}

/// Set `subsidiary = "ERL"` on every document of the given collections
///
/// # Errors
/// Same as [`tag_field`].
pub async fn tag_subsidiary<S>(
    store: &S,
    collections: &[CollectionPath],
    policy: FailurePolicy,
) -> Result<TagReport, OpError>
where
    S: DocumentStore + ?Sized,
{
    tag_field(
        store,
        collections,
        SUBSIDIARY_FIELD,
        Value::String(SUBSIDIARY_TAG.to_string()),
        policy,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_abort() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
    }

    #[test]
    fn report_starts_empty() {
        let report = TagReport::default();
        assert_eq!(report.updated, 0);
        assert!(report.failures.is_empty());
    }
}
