//! Classification of request paths that have no fixed route.

/// Prefix of ingest pipeline resources.
pub const PIPELINE_PREFIX: &str = "/_ingest/pipeline/";

/// Prefix of index template resources.
pub const TEMPLATE_PREFIX: &str = "/_template/";

/// Suffix of bulk endpoints.
pub const BULK_SUFFIX: &str = "/_bulk";

/// What a request path addresses.
///
/// `None` payloads mark a recognized endpoint whose path does not have the
/// expected number of segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourcePath<'a> {
    /// Bulk endpoint with the collection named in the path (empty for `/_bulk`).
    Bulk(Option<&'a str>),
    /// Ingest pipeline with its id.
    Pipeline(Option<&'a str>),
    /// Index template with its id.
    Template(Option<&'a str>),
    NotFound,
}

impl<'a> ResourcePath<'a> {
    /// Classify `path`. The bulk suffix is checked first, so `/_template/_bulk`
    /// is a bulk request against the `_template` collection.
    pub fn parse(path: &'a str) -> Self {
        if let Some(prefix) = path.strip_suffix(BULK_SUFFIX) {
            if prefix.is_empty() {
                return Self::Bulk(Some(""));
            }
            return Self::Bulk(prefix.strip_prefix('/').and_then(single_segment));
        }

        if let Some(id) = path.strip_prefix(PIPELINE_PREFIX) {
            return Self::Pipeline(resource_id(id));
        }

        if let Some(id) = path.strip_prefix(TEMPLATE_PREFIX) {
            return Self::Template(resource_id(id));
        }

        Self::NotFound
    }
}

fn single_segment(segment: &str) -> Option<&str> {
    (!segment.is_empty() && !segment.contains('/')).then_some(segment)
}

/// Store ids may be empty; `/_template/` addresses the id `""`.
fn resource_id(segment: &str) -> Option<&str> {
    (!segment.contains('/')).then_some(segment)
}
