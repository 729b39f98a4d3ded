//! Shared application state

use std::sync::Arc;

use gramflow_client::{ActorPlatformClient, EnrichmentClient};
use gramflow_runner::JobRunner;
use sqlx::PgPool;

/// State shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub runner: Arc<JobRunner<ActorPlatformClient>>,
    pub enricher: Arc<EnrichmentClient>,
}
