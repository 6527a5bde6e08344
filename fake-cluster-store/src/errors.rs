//! Store configuration error types.

use thiserror::Error;

/// Errors building a [`StoreConfig`](crate::StoreConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreConfigError {
    /// The eviction policy name is not recognized.
    #[error("Unknown eviction policy '{0}', expected 'fifo' or 'lru'")]
    UnknownEviction(String),

    /// A bounded store must hold at least one entry.
    #[error("Store capacity must be greater than zero")]
    ZeroCapacity,
}
