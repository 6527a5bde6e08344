//! Configuration types for the bulk dispatcher.

use std::num::NonZeroUsize;

/// Default number of consecutive malformed entries that aborts a request.
pub const DEFAULT_ERROR_BUDGET: usize = 5;

/// Default longest accepted NDJSON line, in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// Configuration for the [`BulkDispatcher`](crate::BulkDispatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkConfig {
    /// Consecutive malformed entries tolerated before processing stops.
    ///
    /// The counter resets on every well-formed entry. Must be at least 1.
    pub error_budget: usize,

    /// Longest line accepted from the body. Longer lines are a read error.
    pub max_line_bytes: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            error_budget: DEFAULT_ERROR_BUDGET,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl BulkConfig {
    /// Create a config with a custom error budget.
    pub fn with_error_budget(mut self, error_budget: NonZeroUsize) -> Self {
        self.error_budget = error_budget.get();
        self
    }

    /// Create a config with a custom line length limit.
    pub fn with_max_line_bytes(mut self, max_line_bytes: NonZeroUsize) -> Self {
        self.max_line_bytes = max_line_bytes.get();
        self
    }
}
