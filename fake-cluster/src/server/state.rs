// App state for Axum server
use std::sync::Arc;

use fake_cluster_bulk::BulkDispatcher;
use fake_cluster_store::{MemoryStore, ResourceStore};

use crate::config::ServerConfig;
use crate::identity::NodeIdentity;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<NodeIdentity>,
    pub dispatcher: Arc<BulkDispatcher>,
    pub pipelines: Arc<dyn ResourceStore>,
    pub templates: Arc<dyn ResourceStore>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig, identity: NodeIdentity) -> Self {
        Self {
            identity: Arc::new(identity),
            dispatcher: Arc::new(BulkDispatcher::new(config.bulk.clone())),
            pipelines: Arc::new(MemoryStore::new("pipeline", config.store)),
            templates: Arc::new(MemoryStore::new("template", config.store)),
            max_body_bytes: config.max_body_bytes,
        }
    }
}
