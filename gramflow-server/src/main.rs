use std::sync::Arc;

use gramflow_client::{ActorPlatformClient, EnrichmentClient};
use gramflow_runner::JobRunner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;
pub mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gramflow_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gramflow Server...");

    let config = config::Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing::info!("Connecting to database...");

    // Create database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database connection pool created");

    // Run migrations
    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Wire the runner to its real collaborators
    let platform = ActorPlatformClient::new(
        config.platform_url.clone(),
        config.actor_id.clone(),
        config.platform_token.clone(),
    );
    let enricher = EnrichmentClient::new(
        config.enricher_url.clone(),
        config.enricher_api_key.clone(),
        config.enricher_model.clone(),
    );
    let runner = JobRunner::new(config.poll.clone(), platform);

    tracing::info!(
        "Job runner configured (poll interval: {:?}, max attempts: {})",
        config.poll.poll_interval,
        config.poll.max_attempts
    );

    // Build router with all API endpoints
    let app = api::create_router(AppState {
        pool,
        runner: Arc::new(runner),
        enricher: Arc::new(enricher),
    });

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
