//! Gramflow HTTP Clients
//!
//! Type-safe HTTP clients for the two external collaborators: the actor
//! platform that executes scrape runs, and the hosted completion service used
//! for caption enrichment.
//!
//! # Example
//!
//! ```no_run
//! use gramflow_client::ActorPlatformClient;
//! use gramflow_core::dto::platform::RunInput;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ActorPlatformClient::new(
//!         "https://api.apify.com",
//!         "nH2AHrwxeTRJoN5hX",
//!         "secret-token",
//!     );
//!
//!     let handle = client
//!         .start_run(&RunInput {
//!             username: vec!["alice".to_string()],
//!             results_limit: Some(30),
//!         })
//!         .await?;
//!
//!     println!("Run started: {}", handle.id);
//!     Ok(())
//! }
//! ```

pub mod enrich;
pub mod error;
mod runs;

// Re-export commonly used types
pub use enrich::EnrichmentClient;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the actor platform API
///
/// Covers the three calls one scrape run needs:
/// - starting an actor run
/// - polling the run's status
/// - fetching the run's dataset items
///
/// Every call is authenticated with the bearer token supplied at
/// construction.
#[derive(Debug, Clone)]
pub struct ActorPlatformClient {
    /// Base URL of the platform (e.g., "https://api.apify.com")
    base_url: String,
    /// Identifier of the scraper actor to run
    actor_id: String,
    /// Bearer credential for every outbound call
    token: String,
    /// HTTP client instance
    client: Client,
}

impl ActorPlatformClient {
    /// Create a new actor platform client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the platform API
    /// * `actor_id` - The scraper actor to run
    /// * `token` - Bearer credential for authentication
    pub fn new(
        base_url: impl Into<String>,
        actor_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            actor_id: actor_id.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a new actor platform client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        actor_id: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            actor_id: actor_id.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the platform
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
