//! Bulk response body rendering.
//!
//! Items are rendered as `{"<kind>":{"_index":..,"_type":"_doc","result":..,"status":..}}`.
//! The top-level `errors` flag is always `false`; clients of the fake cluster
//! are expected to look at the HTTP status and the per-item status codes.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{ItemResult, ResultItem};

/// Document type reported for every item.
pub const DOC_TYPE: &str = "_doc";

#[derive(Serialize)]
struct BulkResponseBody<'a> {
    errors: bool,
    items: &'a [ResultItem],
}

#[derive(Serialize)]
struct ItemBody<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_type")]
    doc_type: &'static str,
    result: ItemResult,
    status: u16,
}

impl Serialize for ResultItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            self.kind.as_str(),
            &ItemBody {
                index: &self.collection,
                doc_type: DOC_TYPE,
                result: self.result,
                status: self.status,
            },
        )?;
        map.end()
    }
}

/// Render the bulk response body for `items`.
pub fn render(items: &[ResultItem]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&BulkResponseBody {
        errors: false,
        items,
    })
}
