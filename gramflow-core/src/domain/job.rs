//! Job domain types

use serde::{Deserialize, Serialize};

/// Which logical fields a caller wants copied into each projected record.
///
/// Wire names are the camelCase field names the browser form submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSelection {
    pub image_url: bool,
    pub caption: bool,
    pub timestamp: bool,
    pub likes: bool,
    pub comments: bool,
}

impl FieldSelection {
    /// Returns true when at least one field is selected.
    pub fn any(&self) -> bool {
        self.image_url || self.caption || self.timestamp || self.likes || self.comments
    }
}

/// A scrape job request. Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Profile handle to scrape.
    pub subject: String,
    /// Maximum number of records to fetch; 0 means unlimited.
    pub result_cap: u32,
    /// Fields to keep when projecting raw records.
    pub fields: FieldSelection,
    /// Whether to run the anime-extraction pass over captions.
    pub enrich: bool,
}

/// Run status vocabulary reported by the actor platform.
///
/// `Succeeded`, `Failed` and `Aborted` are terminal; everything else,
/// including statuses this system does not recognize, keeps the poll loop
/// going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    Aborted,
    /// Any status string not in the known vocabulary.
    #[serde(other)]
    Other,
}

impl RunStatus {
    /// True when no further progress can occur for this run.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::Aborted
        )
    }
}
