//! Error types for bulk request processing.
//!
//! Decode failures are recovered per entry and only feed the consecutive error
//! budget. Read errors abort the whole request.

use thiserror::Error;

use crate::types::ActionKind;

/// Failure to decode an action line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// The line is not valid JSON, or not a JSON object.
    #[error("Action line is not a JSON object: {0}")]
    NotJson(String),

    /// None of `index`, `delete`, `create` or `update` is present.
    #[error("Missing or unexpected action")]
    UnknownOrMissingKind,

    /// The recognized key is present but its value is not an object.
    #[error("Unexpected metadata format for {0} action")]
    MalformedMetadata(ActionKind),
}

impl DecodeFailure {
    /// The action kind to report in the response, if this failure is visible.
    ///
    /// `NotJson` and `UnknownOrMissingKind` leave no trace in the response
    /// items; only `MalformedMetadata` produces a failed item.
    pub fn visible_kind(&self) -> Option<ActionKind> {
        match self {
            Self::MalformedMetadata(kind) => Some(*kind),
            Self::NotJson(_) | Self::UnknownOrMissingKind => None,
        }
    }
}

/// The document line following an action is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Document line is not a JSON object: {0}")]
pub struct DocumentDecodeFailure(pub String);

/// Failure reading the request body.
///
/// Distinct from end of input, which is reported as `Ok(None)` by the reader.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying body stream failed.
    #[error("Unable to read request: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum length.
    #[error("Line exceeds maximum length of {limit} bytes")]
    LineTooLong { limit: usize },
}
