// src/llm/http_client.rs
// Shared HTTP client configuration for chat model providers

use crate::error::{ExpertError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Error envelope returned by OpenAI-compatible APIs
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// HTTP client for LLM providers.
///
/// Requests are sent exactly once; failures are surfaced to the caller
/// without retrying.
pub struct LlmHttpClient {
    client: Client,
    request_timeout: Duration,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            request_timeout,
        }
    }

    /// POST a JSON body with Bearer auth and return the response body as text
    pub async fn post_json(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(request_id = %request_id, error = %e, "Model API request failed");
                self.transport_error(&e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            warn!(request_id = %request_id, status = %status, "Model API returned an error status");
            return Err(ExpertError::Upstream(format!(
                "API error {}: {}",
                status,
                extract_error_message(&text)
            )));
        }

        Ok(text)
    }

    /// A reqwest timeout is reported the same way as the consultation timeout
    fn transport_error(&self, e: &reqwest::Error) -> ExpertError {
        if e.is_timeout() {
            ExpertError::Timeout(self.request_timeout)
        } else {
            ExpertError::Upstream(describe_transport_error(e))
        }
    }
}

/// Pull `error.message` out of a provider error body, falling back to the raw text
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_connect() {
        format!("could not connect: {}", e)
    } else {
        format!("request failed: {}", e)
    }
}
