//! Enrichment DTOs

use serde::{Deserialize, Serialize};

/// Position of one record within a sequential enrichment pass.
///
/// Only records that carry a caption count toward `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Request body for a single caption extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    #[serde(default)]
    pub progress: Option<Progress>,
}

/// Response body for a single caption extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub label: String,
    pub progress: Progress,
}
