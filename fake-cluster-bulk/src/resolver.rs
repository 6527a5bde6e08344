//! Target collection resolution for bulk actions.

use crate::action::ActionMetadata;

/// Compute the collection an action targets.
///
/// A non-empty `_index` in the action metadata wins over the collection taken
/// from the request path. Both may be empty, in which case the result is empty
/// and the action still proceeds.
pub fn resolve(metadata: &ActionMetadata, default_collection: &str) -> String {
    match metadata.index.as_deref() {
        Some(index) if !index.is_empty() => index.to_string(),
        _ => default_collection.to_string(),
    }
}
