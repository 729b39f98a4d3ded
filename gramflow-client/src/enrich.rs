//! Enrichment client
//!
//! Single-shot caption enrichment through a hosted chat-completion service.
//! The runner only depends on the extract-a-short-label contract, not on the
//! service behind it.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};
use gramflow_core::dto::enrich::Progress;

/// HTTP client for the hosted completion service
#[derive(Debug, Clone)]
pub struct EnrichmentClient {
    /// Base URL of the completion API (e.g., "https://openrouter.ai/api/v1")
    base_url: String,
    /// Bearer credential
    api_key: String,
    /// Model identifier passed on every completion call
    model: String,
    /// HTTP client instance
    client: Client,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl EnrichmentClient {
    /// Create a new enrichment client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    /// Get the base URL of the completion service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extract a short anime label from free-form caption text
    ///
    /// # Arguments
    /// * `text` - The caption to extract from
    /// * `progress` - Position of this record within the enrichment pass,
    ///   used for log attribution only
    ///
    /// # Returns
    /// The trimmed label the model produced
    pub async fn extract(&self, text: &str, progress: Progress) -> Result<String> {
        debug!(
            "Requesting extraction ({}/{})",
            progress.current, progress.total
        );

        let prompt = format!(
            "in one word extract from this text the anime highlighted: \"{}\"",
            text
        );

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages: vec![Message {
                    role: "user",
                    content: prompt,
                }],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse completion response: {}", e))
        })?;

        let label = completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| {
                ClientError::ParseError("Completion response contained no choices".to_string())
            })?;

        Ok(label)
    }
}
