// src/llm/openai.rs
// OpenAI chat completions client

use super::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, LlmHttpClient};
use super::logging::{log_completion, log_usage};
use super::openai_compat::{ChatRequest, parse_chat_response};
use super::{ChatModel, Message};
use crate::config::{ApiKey, LlmSettings};
use crate::error::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI (or OpenAI-compatible) chat completions client.
///
/// The credential is handed in by the caller; this type never reads the
/// environment.
pub struct OpenAiClient {
    api_key: ApiKey,
    base_url: String,
    http: LlmHttpClient,
}

impl OpenAiClient {
    /// Client for a completion client configured with `settings`.
    ///
    /// The transport timeout sits one connect timeout above `settings.timeout`
    /// so the consultation deadline is the one that fires.
    pub fn from_settings(api_key: ApiKey, settings: &LlmSettings) -> Self {
        let connect_timeout = Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS);
        let http = LlmHttpClient::new(settings.timeout + connect_timeout, connect_timeout);
        Self::with_http(api_key, settings.base_url.clone(), http)
    }

    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        let http = LlmHttpClient::new(
            Duration::from_secs(300),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        );
        Self::with_http(api_key, base_url, http)
    }

    pub fn with_http(api_key: ApiKey, base_url: impl Into<String>, http: LlmHttpClient) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self, messages, model), fields(request_id, model = %model, message_count = messages.len()))]
    async fn chat(&self, messages: Vec<Message>, model: &str, temperature: f32) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        Span::current().record("request_id", request_id.as_str());

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            model = %model,
            temperature = temperature,
            "Starting OpenAI chat request"
        );

        let request = ChatRequest::new(model, messages).with_temperature(temperature);
        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, body_len = body.len(), "OpenAI request built");

        let response_body = self
            .http
            .post_json(&request_id, &self.completions_url(), self.api_key.expose(), body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body)?;

        if let Some(ref u) = result.usage {
            log_usage(&request_id, "OpenAI", u);
        }
        log_completion(
            &request_id,
            "OpenAI",
            duration_ms,
            result.content.len(),
            result.finish_reason.as_deref(),
        );

        Ok(result.content)
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        model: &str,
        temperature: f32,
    ) -> Result<String> {
        self.chat(messages, model, temperature).await
    }
}
