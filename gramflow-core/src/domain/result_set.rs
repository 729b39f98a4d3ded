//! Stored result-set types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::record::ProjectedRecord;

/// One persisted scrape result set.
///
/// Immutable after creation: the store supports create and read only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub id: Uuid,
    /// Profile handle the records were scraped from.
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub record_count: i32,
    pub records: Vec<ProjectedRecord>,
}

/// Listing row for stored result sets; the record payload is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSetSummary {
    pub id: Uuid,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub record_count: i32,
}
