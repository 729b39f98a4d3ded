//! Wire types for the actor platform API

use serde::{Deserialize, Serialize};

use crate::domain::job::RunStatus;

/// Submission payload for one actor run.
///
/// The platform treats an absent `resultsLimit` as "fetch everything"; a cap
/// of 0 is therefore expressed by omitting the field entirely rather than
/// sending 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInput {
    /// Subject handle, wrapped as a single-element list as the actor expects.
    pub username: Vec<String>,
    #[serde(rename = "resultsLimit", skip_serializing_if = "Option::is_none")]
    pub results_limit: Option<u32>,
}

/// Handle returned by the platform when a run is started.
///
/// Valid only between submission and the run reaching a terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunHandle {
    pub id: String,
}

/// Status snapshot for a run in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub status: RunStatus,
    /// Dataset holding the run's output; present once the platform has
    /// allocated it.
    pub default_dataset_id: Option<String>,
}
