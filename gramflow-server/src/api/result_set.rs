//! Result Set API Handlers
//!
//! HTTP endpoints for browsing and merging stored result sets.

use axum::{
    Json,
    extract::{Path, State},
};
use gramflow_core::domain::result_set::{ResultSet, ResultSetSummary};
use gramflow_core::dto::merge::{MergeOutcome, MergeRequest};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::service::result_set_service;
use crate::state::AppState;

/// GET /api/results
/// List summaries of all stored result sets, newest first
pub async fn list_result_sets(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ResultSetSummary>>> {
    tracing::debug!("Listing stored result sets");

    let summaries = result_set_service::list_result_sets(&state.pool)
        .await
        .map_err(|e| match e {
            result_set_service::ResultSetError::NotFound(id) => {
                ApiError::NotFound(format!("Result set {} not found", id))
            }
            result_set_service::ResultSetError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(summaries))
}

/// GET /api/results/{id}
/// Get a stored result set, including its records
pub async fn get_result_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ResultSet>> {
    tracing::debug!("Getting result set: {}", id);

    let set = result_set_service::get_result_set(&state.pool, id)
        .await
        .map_err(|e| match e {
            result_set_service::ResultSetError::NotFound(id) => {
                ApiError::NotFound(format!("Result set {} not found", id))
            }
            result_set_service::ResultSetError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(set))
}

/// POST /api/results/merge
/// Merge the selected result sets into one record collection
pub async fn merge_result_sets(
    State(state): State<AppState>,
    Json(req): Json<MergeRequest>,
) -> ApiResult<Json<MergeOutcome>> {
    if req.ids.is_empty() {
        return Err(ApiError::BadRequest(
            "Select at least one result set to merge".to_string(),
        ));
    }

    tracing::info!("Merging {} result sets", req.ids.len());

    let outcome = result_set_service::merge_result_sets(&state.pool, &req.ids)
        .await
        .map_err(|e| match e {
            result_set_service::ResultSetError::NotFound(id) => {
                ApiError::NotFound(format!("Result set {} not found", id))
            }
            result_set_service::ResultSetError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(outcome))
}
