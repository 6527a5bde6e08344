//! Core types shared by the bulk decoder, dispatcher and response assembler.

use serde::Serialize;

/// One of the four operations of the bulk protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Index,
    Delete,
    Create,
    Update,
}

impl ActionKind {
    /// Recognized action keys, in the order they are looked up on an action line.
    pub const PRECEDENCE: [ActionKind; 4] = [
        ActionKind::Index,
        ActionKind::Delete,
        ActionKind::Create,
        ActionKind::Update,
    ];

    /// Returns the key used for this kind on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Index => "index",
            ActionKind::Delete => "delete",
            ActionKind::Create => "create",
            ActionKind::Update => "update",
        }
    }

    /// Whether a document line follows the action line.
    pub fn requires_document(&self) -> bool {
        !matches!(self, ActionKind::Delete)
    }

    /// Status code and result reported when the entry succeeds.
    pub fn success(&self) -> (u16, ItemResult) {
        match self {
            ActionKind::Index => (200, ItemResult::Created),
            ActionKind::Create => (201, ItemResult::Created),
            ActionKind::Update => (201, ItemResult::Updated),
            ActionKind::Delete => (200, ItemResult::Deleted),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome string of a single bulk item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemResult {
    Created,
    Deleted,
    Updated,
    Failed,
}

/// Status reported for a failed entry, whatever its kind.
pub const FAILED_ITEM_STATUS: u16 = 400;

/// One entry of the `items` array in a bulk response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub kind: ActionKind,
    /// Effective collection; always empty for failed items.
    pub collection: String,
    pub status: u16,
    pub result: ItemResult,
}

impl ResultItem {
    /// A simulated successful operation against `collection`.
    pub fn success(kind: ActionKind, collection: impl Into<String>) -> Self {
        let (status, result) = kind.success();
        Self {
            kind,
            collection: collection.into(),
            status,
            result,
        }
    }

    /// A visible failure for an entry of the given kind.
    pub fn failed(kind: ActionKind) -> Self {
        Self {
            kind,
            collection: String::new(),
            status: FAILED_ITEM_STATUS,
            result: ItemResult::Failed,
        }
    }
}

/// Overall HTTP status of a bulk response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    /// Input consumed to the end (or truncated) without an abort condition.
    Ok,
    /// Processing stopped early on the error budget or a read error.
    PartialContent,
}

impl OverallStatus {
    pub fn as_u16(&self) -> u16 {
        match self {
            OverallStatus::Ok => 200,
            OverallStatus::PartialContent => 206,
        }
    }
}

/// State of the bulk dispatcher for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Running,
    AbortedByErrorBudget,
    AbortedByTruncation,
    AbortedByReadError,
    Completed,
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DispatchState::Running)
    }
}
