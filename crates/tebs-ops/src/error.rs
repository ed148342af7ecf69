//! Error types for administrative operations

use tebs_store::{CollectionPath, DocumentPath, StoreError};

/// Errors raised by an administrative pass
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    /// Listing a collection failed; nothing in it was touched
    #[error("failed to list {collection}: {source}")]
    ListFailed {
        collection: CollectionPath,
        #[source]
        source: StoreError,
    },

    /// A document update failed under [`crate::FailurePolicy::Abort`]
    ///
    /// `updated` is the number of documents already written; those stay
    /// written, there is no rollback.
    #[error("failed to update {doc} after {updated} updates: {source}")]
    UpdateFailed {
        doc: DocumentPath,
        updated: u64,
        #[source]
        source: StoreError,
    },

    /// Store failure outside the per-document loop
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_failed_display_reports_partial_count() {
        let err = OpError::UpdateFailed {
            doc: DocumentPath::parse("2025/p2").unwrap(),
            updated: 1,
            source: StoreError::Api {
                status: 503,
                message: "backend unavailable".to_string(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("2025/p2"));
        assert!(text.contains("after 1 updates"));
    }
}
