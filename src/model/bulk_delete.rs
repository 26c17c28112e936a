use serde::{Deserialize, Serialize};

/// Outcome of a bulk version deletion.
///
/// `deleted + failed.len() == requested` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteReport {
    pub requested: usize,
    pub deleted: usize,
    pub failed: Vec<BulkDeleteFailure>,
}

/// A version that could not be deleted, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteFailure {
    pub id: i32,
    pub reason: String,
}
