//! # Fake Cluster
//!
//! A stand-in for a search cluster's HTTP API, used to exercise ingest agents
//! without running a real cluster.
//!
//! ## Endpoints
//!
//! - `GET /`: node descriptor
//! - `GET /_xpack`: feature availability
//! - `POST /_bulk`, `POST /<collection>/_bulk`: NDJSON bulk ingest
//! - `/_template/<id>`: index templates (GET, HEAD, PUT)
//! - `/_ingest/pipeline/<id>`: ingest pipelines (GET, PUT)
//!
//! Bulk operations are simulated; only templates and pipelines are kept.

pub mod config;
pub mod errors;
pub mod identity;
pub mod server;

pub use config::{LogFormat, ServerConfig};
pub use errors::ServerError;
pub use identity::NodeIdentity;
pub use server::state::AppState;
pub use server::{bind, create_app, serve, shutdown_signal};
