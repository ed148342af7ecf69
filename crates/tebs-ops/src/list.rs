//! Top-level collection listing

use crate::error::OpError;
use std::collections::BTreeSet;
use tebs_store::DocumentStore;

/// Identifier set of the store's top-level collections
///
/// The set is order-insensitive by construction.
///
/// # Errors
/// Propagates the store failure unchanged.
pub async fn list_collections<S>(store: &S) -> Result<BTreeSet<String>, OpError>
where
    S: DocumentStore + ?Sized,
{
    let roots = store.list_root_collections().await?;
    tracing::debug!(count = roots.len(), "listed root collections");
    Ok(roots)
}
