//! Enrichment API Handler
//!
//! Single-caption extraction endpoint, used by the UI to enrich one caption
//! at a time.

use axum::{Json, extract::State};
use gramflow_core::dto::enrich::{ExtractRequest, ExtractResponse};

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/enrich
/// Extract a short label from one caption
pub async fn extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> ApiResult<Json<ExtractResponse>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid or missing text".to_string(),
        ));
    }

    let progress = req.progress.unwrap_or_default();
    tracing::info!(
        "Extracting label ({}/{})",
        progress.current,
        progress.total
    );

    let label = state
        .enricher
        .extract(&req.text, progress)
        .await
        .map_err(|e| ApiError::InternalError(format!("Failed to extract label: {}", e)))?;

    Ok(Json(ExtractResponse { label, progress }))
}
