use serde::{Deserialize, Serialize};

use crate::records::repo_types::Record;

/// What the client renders: records in arrival order, current selection, session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub selected: Vec<String>,
    pub session: Option<Record>,
}

/// Result of a block, unblock or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub affected: usize,
    pub logged_out: bool,
}

/// Response body for bulk actions.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub outcome: BulkOutcome,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
}
