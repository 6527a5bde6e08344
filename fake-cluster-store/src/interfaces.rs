//! Store interface used by the HTTP handlers.

use async_trait::async_trait;
use bytes::Bytes;

/// A keyed store of opaque request bodies.
///
/// Implementations serialize concurrent access internally; handlers share one
/// instance per resource type across all connections.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Get the body stored under `id`.
    async fn get(&self, id: &str) -> Option<Bytes>;

    /// Store `body` under `id`, overwriting any previous body.
    async fn put(&self, id: &str, body: Bytes);

    /// Whether a body is stored under `id`.
    ///
    /// Unlike [`get`](Self::get) this does not count as an access for
    /// recency-based eviction.
    async fn contains(&self, id: &str) -> bool;

    /// Number of stored entries.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
