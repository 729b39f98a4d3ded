//! Job DTOs for the inbound HTTP API

use serde::{Deserialize, Serialize};

use crate::domain::job::FieldSelection;
use crate::domain::record::ProjectedRecord;

/// Request body for starting a scrape job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    /// Profile handle to scrape.
    pub subject: String,
    #[serde(default)]
    pub fields: FieldSelection,
    /// Maximum number of records to fetch; 0 or absent means unlimited.
    #[serde(default)]
    pub result_cap: u32,
    /// Whether to run the anime-extraction pass over captions.
    #[serde(default)]
    pub enrich: bool,
}

/// Response body for a completed scrape job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutcome {
    pub records: Vec<ProjectedRecord>,
    /// Suggested download name combining the subject and submission time.
    pub name: String,
    pub subject: String,
    pub count: usize,
    /// False when the result store rejected the write; the records are still
    /// returned.
    pub persisted: bool,
    /// True when at least one record gained an `anime` field.
    pub enriched: bool,
}
