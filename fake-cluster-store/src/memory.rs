//! In-memory store with optional capacity bound.

use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::{EvictionPolicy, StoreConfig};
use crate::interfaces::ResourceStore;

/// Keyed in-memory store guarded by a single lock.
///
/// Entries live in an [`LruCache`]. Under [`EvictionPolicy::Fifo`] reads and
/// overwrites use the non-promoting `peek` accessors, so the cache order stays
/// the insertion order and the oldest insert is evicted first.
pub struct MemoryStore {
    /// Resource name used in log lines, e.g. "template".
    name: &'static str,
    config: StoreConfig,
    entries: Mutex<LruCache<String, Bytes>>,
}

impl MemoryStore {
    pub fn new(name: &'static str, config: StoreConfig) -> Self {
        let entries = match config.capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };

        Self {
            name,
            config,
            entries: Mutex::new(entries),
        }
    }

    /// Create a store with no capacity limit.
    pub fn unbounded(name: &'static str) -> Self {
        Self::new(name, StoreConfig::unbounded())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get(&self, id: &str) -> Option<Bytes> {
        let mut entries = self.entries.lock().await;
        match self.config.eviction {
            EvictionPolicy::Lru => entries.get(id).cloned(),
            EvictionPolicy::Fifo => entries.peek(id).cloned(),
        }
    }

    async fn put(&self, id: &str, body: Bytes) {
        let mut entries = self.entries.lock().await;

        if self.config.eviction == EvictionPolicy::Fifo {
            if let Some(stored) = entries.peek_mut(id) {
                *stored = body;
                return;
            }
        }

        // `push` hands back either the replaced entry or the evicted one.
        if let Some((evicted, _)) = entries.push(id.to_string(), body) {
            if evicted != id {
                debug!(
                    store = self.name,
                    id = %evicted,
                    policy = %self.config.eviction,
                    "Evicted entry"
                );
            }
        }
    }

    async fn contains(&self, id: &str) -> bool {
        self.entries.lock().await.contains(id)
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
