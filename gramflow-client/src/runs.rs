//! Actor-run endpoints

use crate::ActorPlatformClient;
use crate::error::Result;
use gramflow_core::domain::record::RawRecord;
use gramflow_core::dto::platform::{RunHandle, RunInput, RunState};
use serde::Deserialize;

/// Envelope the platform wraps run objects in.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

impl ActorPlatformClient {
    /// Start a new actor run
    ///
    /// # Arguments
    /// * `input` - The submission payload (subject plus optional result limit)
    ///
    /// # Returns
    /// An opaque handle identifying the run for later status and result
    /// queries
    pub async fn start_run(&self, input: &RunInput) -> Result<RunHandle> {
        let url = format!("{}/v2/acts/{}/runs", self.base_url, self.actor_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let envelope: DataEnvelope<RunHandle> = self.handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Get the current status of a run
    ///
    /// # Arguments
    /// * `run_id` - The handle returned by [`start_run`](Self::start_run)
    pub async fn run_status(&self, run_id: &str) -> Result<RunState> {
        let url = format!("{}/v2/actor-runs/{}", self.base_url, run_id);
        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;

        let envelope: DataEnvelope<RunState> = self.handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Fetch all items from a run's dataset
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset reference reported by the run's status
    pub async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<RawRecord>> {
        let url = format!("{}/v2/datasets/{}/items", self.base_url, dataset_id);
        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;

        self.handle_response(response).await
    }
}
