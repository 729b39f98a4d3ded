//! Job API Handlers
//!
//! HTTP endpoint that drives one scrape job to completion.

use axum::{Json, extract::State};
use gramflow_core::domain::job::JobRequest;
use gramflow_core::dto::job::{CreateJob, JobOutcome};

use crate::api::error::ApiResult;
use crate::service::result_set::StoreSink;
use crate::state::AppState;

/// POST /api/jobs
/// Run a scrape job and return the projected records
///
/// The run is synchronous from the caller's point of view: submission,
/// polling and retrieval all happen within this request. Persistence failure
/// degrades to `persisted: false` rather than failing the response.
pub async fn create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJob>,
) -> ApiResult<Json<JobOutcome>> {
    tracing::info!("Processing scrape request for {}", req.subject);

    let request = JobRequest {
        subject: req.subject,
        result_cap: req.result_cap,
        fields: req.fields,
        enrich: req.enrich,
    };

    let sink = StoreSink::new(state.pool.clone());
    let outcome = state
        .runner
        .run(&request, state.enricher.as_ref(), &sink)
        .await?;

    let count = outcome.records.len();
    tracing::info!(
        "Scrape for {} finished with {} records (persisted: {})",
        outcome.subject,
        count,
        outcome.persisted
    );

    Ok(Json(JobOutcome {
        records: outcome.records,
        name: outcome.name,
        subject: outcome.subject,
        count,
        persisted: outcome.persisted,
        enriched: outcome.enriched,
    }))
}
