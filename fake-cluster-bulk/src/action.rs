//! Decoding of action and document lines.
//!
//! Lines are decoded leniently: invalid UTF-8 is replaced with U+FFFD before
//! parsing, and nested values below the top-level object are skipped without
//! building them, so deep documents are not cut off by a recursion limit.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::de::IgnoredAny;
use serde_json::value::RawValue;

use crate::errors::{DecodeFailure, DocumentDecodeFailure};
use crate::types::ActionKind;

/// Metadata object attached to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMetadata {
    /// Raw `_index` value when it is a string. May be empty.
    pub index: Option<String>,
}

/// A decoded action line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub metadata: ActionMetadata,
}

/// Top-level members of a JSON object, left unparsed.
type RawObject<'a> = HashMap<String, &'a RawValue>;

/// Decode one action line.
///
/// When several recognized keys are present the first one in
/// [`ActionKind::PRECEDENCE`] is used. A `null` line carries no keys and is
/// reported as [`DecodeFailure::UnknownOrMissingKind`].
pub fn decode_action(line: &[u8]) -> Result<Action, DecodeFailure> {
    let text = lossy(line);
    let object = serde_json::from_str::<Option<RawObject<'_>>>(&text)
        .map_err(|e| DecodeFailure::NotJson(e.to_string()))?
        .ok_or(DecodeFailure::UnknownOrMissingKind)?;

    let (kind, metadata) = ActionKind::PRECEDENCE
        .iter()
        .find_map(|kind| object.get(kind.as_str()).map(|raw| (*kind, *raw)))
        .ok_or(DecodeFailure::UnknownOrMissingKind)?;

    let metadata = serde_json::from_str::<RawObject<'_>>(metadata.get())
        .map_err(|_| DecodeFailure::MalformedMetadata(kind))?;

    Ok(Action {
        kind,
        metadata: ActionMetadata {
            index: metadata
                .get("_index")
                .and_then(|raw| serde_json::from_str::<String>(raw.get()).ok()),
        },
    })
}

/// Check that a document line is a JSON object (or `null`).
///
/// The contents are not interpreted.
pub fn decode_document(line: &[u8]) -> Result<(), DocumentDecodeFailure> {
    serde_json::from_str::<Option<HashMap<String, IgnoredAny>>>(&lossy(line))
        .map(|_| ())
        .map_err(|e| DocumentDecodeFailure(e.to_string()))
}

fn lossy(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}
