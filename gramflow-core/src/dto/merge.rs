//! Merge DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::record::ProjectedRecord;

/// Request body for merging stored result sets.
///
/// Sets are concatenated in the order the ids are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    pub ids: Vec<Uuid>,
}

/// Merged records from several stored result sets.
///
/// Each record carries a `username` field naming the subject of the set it
/// came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub records: Vec<ProjectedRecord>,
    pub count: usize,
    /// Number of result sets that contributed records.
    pub sources: usize,
}
