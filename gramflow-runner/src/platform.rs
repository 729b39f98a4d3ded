//! Collaborator seams
//!
//! The runner drives its collaborators through these traits so tests can
//! substitute scripted implementations for the remote services. The real
//! implementations live in gramflow-client (HTTP) and gramflow-server
//! (result store).

use async_trait::async_trait;

use gramflow_client::{ActorPlatformClient, ClientError, EnrichmentClient};
use gramflow_core::domain::record::{ProjectedRecord, RawRecord};
use gramflow_core::dto::enrich::Progress;
use gramflow_core::dto::platform::{RunHandle, RunInput, RunState};

/// Remote service that executes scrape runs
#[async_trait]
pub trait ActorPlatform: Send + Sync {
    /// Start a run and return its handle
    async fn start_run(&self, input: &RunInput) -> Result<RunHandle, ClientError>;

    /// Report the current status of a run
    async fn run_status(&self, run_id: &str) -> Result<RunState, ClientError>;

    /// Fetch all items from a run's dataset
    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<RawRecord>, ClientError>;
}

#[async_trait]
impl ActorPlatform for ActorPlatformClient {
    async fn start_run(&self, input: &RunInput) -> Result<RunHandle, ClientError> {
        ActorPlatformClient::start_run(self, input).await
    }

    async fn run_status(&self, run_id: &str) -> Result<RunState, ClientError> {
        ActorPlatformClient::run_status(self, run_id).await
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<RawRecord>, ClientError> {
        ActorPlatformClient::dataset_items(self, dataset_id).await
    }
}

/// Per-record caption enrichment
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Extract a short label from caption text
    async fn extract(&self, text: &str, progress: Progress) -> Result<String, ClientError>;
}

#[async_trait]
impl Enricher for EnrichmentClient {
    async fn extract(&self, text: &str, progress: Progress) -> Result<String, ClientError> {
        EnrichmentClient::extract(self, text, progress).await
    }
}

/// Destination for completed result sets
///
/// Write failures are reported to the caller, which records them as a
/// degraded outcome rather than a failed run.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one result set under the given subject
    async fn create(&self, subject: &str, records: &[ProjectedRecord]) -> anyhow::Result<()>;
}
