//! # Fake Cluster Bulk
//!
//! Handling of the NDJSON bulk-ingest protocol for the fake search cluster.
//!
//! ## Architecture
//!
//! A bulk body is a sequence of entries: an action line, followed by a document
//! line for `index`, `create` and `update` (`delete` has none).
//!
//! 1. **Reader**: hands out body lines one at a time
//! 2. **Action**: decodes action and document lines
//! 3. **Resolver**: picks the target collection for an action
//! 4. **Dispatcher**: drives the entries, applies the consecutive error budget
//!    and decides the overall status
//! 5. **Response**: renders the result items
//!
//! Nothing is stored; operations are simulated and always succeed when the
//! entry is well-formed.

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod reader;
pub mod resolver;
pub mod response;
pub mod types;

pub use action::{decode_action, decode_document, Action, ActionMetadata};
pub use config::BulkConfig;
pub use dispatcher::{BulkDispatcher, BulkOutcome, StatusLatch};
pub use errors::{DecodeFailure, DocumentDecodeFailure, ReadError};
pub use reader::LineReader;
pub use resolver::resolve;
pub use types::{ActionKind, DispatchState, ItemResult, OverallStatus, ResultItem};
