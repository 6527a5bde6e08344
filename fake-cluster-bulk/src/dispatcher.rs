//! Bulk request state machine.
//!
//! The dispatcher pulls action lines from the body, pulls one more line as the
//! document for `index`, `create` and `update`, and records one result item
//! per entry. Malformed entries are recovered locally but count towards a
//! consecutive error budget; exhausting the budget or failing to read the body
//! stops processing and degrades the overall status to `PartialContent`.

use std::cell::OnceCell;

use tokio::io::AsyncBufRead;
use tracing::{debug, warn};

use crate::action::{decode_action, decode_document};
use crate::config::BulkConfig;
use crate::errors::ReadError;
use crate::reader::LineReader;
use crate::resolver::resolve;
use crate::response;
use crate::types::{DispatchState, OverallStatus, ResultItem};

/// Set-once holder for the overall response status.
///
/// The first decision wins. Later attempts are ignored and only logged, the
/// same way a status line cannot be changed once it has been sent.
#[derive(Debug, Default)]
pub struct StatusLatch(OnceCell<OverallStatus>);

impl StatusLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to decide the status, returning whichever status is in effect.
    pub fn decide(&self, status: OverallStatus) -> OverallStatus {
        let mut latched_now = false;
        let current = *self.0.get_or_init(|| {
            latched_now = true;
            status
        });

        if !latched_now {
            debug!(
                current = ?current,
                attempted = ?status,
                "Response status already decided, ignoring"
            );
        }

        current
    }

    pub fn get(&self) -> Option<OverallStatus> {
        self.0.get().copied()
    }
}

/// Result of dispatching one bulk request.
#[derive(Debug)]
pub struct BulkOutcome {
    /// Terminal state the dispatcher stopped in.
    pub state: DispatchState,
    pub status: OverallStatus,
    /// Visible items, in the order the entries were read.
    pub items: Vec<ResultItem>,
}

impl BulkOutcome {
    /// Render the response body for this outcome.
    pub fn render(&self) -> serde_json::Result<Vec<u8>> {
        response::render(&self.items)
    }
}

/// Drives a bulk request body to completion.
#[derive(Debug, Clone, Default)]
pub struct BulkDispatcher {
    config: BulkConfig,
}

impl BulkDispatcher {
    pub fn new(config: BulkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Process every entry of `body`.
    ///
    /// `default_collection` is the collection named in the request path, or
    /// empty when the path carries none.
    pub async fn dispatch<R>(&self, body: R, default_collection: &str) -> BulkOutcome
    where
        R: AsyncBufRead + Unpin,
    {
        let mut reader = LineReader::new(body, self.config.max_line_bytes);
        let mut run = DispatchRun::new(default_collection, self.config.error_budget);

        let mut state = DispatchState::Running;
        while !state.is_terminal() {
            state = run.step(&mut reader).await;
        }

        // No-op when an abort condition already decided the status.
        let status = run.status.decide(OverallStatus::Ok);

        debug!(
            state = ?state,
            status = status.as_u16(),
            items = run.items.len(),
            lines = reader.lines_read(),
            "Bulk request finished"
        );

        BulkOutcome {
            state,
            status,
            items: run.items,
        }
    }
}

/// Per-request dispatch state.
struct DispatchRun<'a> {
    default_collection: &'a str,
    error_budget: usize,
    consecutive_errors: usize,
    items: Vec<ResultItem>,
    status: StatusLatch,
}

impl<'a> DispatchRun<'a> {
    fn new(default_collection: &'a str, error_budget: usize) -> Self {
        Self {
            default_collection,
            error_budget,
            consecutive_errors: 0,
            items: Vec::new(),
            status: StatusLatch::new(),
        }
    }

    /// Consume one entry and return the next state.
    async fn step<R>(&mut self, reader: &mut LineReader<R>) -> DispatchState
    where
        R: AsyncBufRead + Unpin,
    {
        let decoded = match reader.next_line().await {
            Ok(Some(line)) => decode_action(line),
            Ok(None) => return DispatchState::Completed,
            Err(e) => return self.read_failed(e),
        };

        let action = match decoded {
            Ok(action) => action,
            Err(failure) => {
                warn!(line = reader.lines_read(), error = %failure, "Unable to decode action");
                if let Some(kind) = failure.visible_kind() {
                    self.items.push(ResultItem::failed(kind));
                }
                return self.entry_failed();
            }
        };

        let collection = resolve(&action.metadata, self.default_collection);

        if action.kind.requires_document() {
            let document = match reader.next_line().await {
                Ok(Some(line)) => decode_document(line),
                Ok(None) => {
                    warn!(kind = %action.kind, "Request ended before document line");
                    return DispatchState::AbortedByTruncation;
                }
                Err(e) => return self.read_failed(e),
            };

            if let Err(failure) = document {
                warn!(
                    line = reader.lines_read(),
                    kind = %action.kind,
                    error = %failure,
                    "Unable to decode document"
                );
                self.items.push(ResultItem::failed(action.kind));
                return self.entry_failed();
            }
        }

        debug!(kind = %action.kind, collection = %collection, "Simulated bulk operation");
        self.consecutive_errors = 0;
        self.items.push(ResultItem::success(action.kind, collection));
        DispatchState::Running
    }

    fn entry_failed(&mut self) -> DispatchState {
        self.consecutive_errors += 1;
        if self.consecutive_errors < self.error_budget {
            return DispatchState::Running;
        }

        warn!(
            consecutive_errors = self.consecutive_errors,
            "Too many consecutive errors, abandoning request"
        );
        self.status.decide(OverallStatus::PartialContent);
        DispatchState::AbortedByErrorBudget
    }

    fn read_failed(&mut self, error: ReadError) -> DispatchState {
        warn!(error = %error, "Unable to read request");
        self.status.decide(OverallStatus::PartialContent);
        DispatchState::AbortedByReadError
    }
}
