//! Error types for the fake cluster server.

use fake_cluster_store::StoreConfigError;
use thiserror::Error;

/// Errors that can occur during server startup or execution.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Binding or serving failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<StoreConfigError> for ServerError {
    fn from(err: StoreConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
