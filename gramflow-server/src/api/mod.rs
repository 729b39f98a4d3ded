//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod enrich;
pub mod error;
pub mod health;
pub mod job;
pub mod result_set;
pub mod usage;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Scrape jobs
        .route("/api/jobs", post(job::create_job))
        // Single-caption enrichment
        .route("/api/enrich", post(enrich::extract))
        // Stored result sets
        .route("/api/results", get(result_set::list_result_sets))
        .route("/api/results/merge", post(result_set::merge_result_sets))
        .route("/api/results/{id}", get(result_set::get_result_set))
        // Platform quota snapshot
        .route("/api/usage", get(usage::get_usage))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
