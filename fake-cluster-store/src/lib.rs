//! # Fake Cluster Store
//!
//! Keyed stores backing the ingest pipeline and index template endpoints of the
//! fake search cluster. Bodies are kept verbatim and returned as stored.
//!
//! Stores are unbounded unless configured with a capacity, in which case a
//! FIFO or LRU [`EvictionPolicy`] decides which entry to drop.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;

pub use config::{EvictionPolicy, StoreConfig};
pub use errors::StoreConfigError;
pub use interfaces::ResourceStore;
pub use memory::MemoryStore;
