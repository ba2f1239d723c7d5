// src/experts/consultation.rs
// Completion client: persona prompt + user text -> one model call -> reply text

use super::{ExpertRegistry, PersonaDefinition};
use crate::config::LlmSettings;
use crate::error::{ErrorKind, ExpertError, Result};
use crate::llm::{ChatModel, Message};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Warning shown when the submitted text is blank
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text.";

/// One form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub persona_key: String,
    pub user_text: String,
}

impl Submission {
    pub fn new(persona_key: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            persona_key: persona_key.into(),
            user_text: user_text.into(),
        }
    }

    /// Reject empty or whitespace-only text before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.user_text.trim().is_empty() {
            return Err(ExpertError::Validation(EMPTY_INPUT_WARNING.to_string()));
        }
        Ok(())
    }
}

/// Result of a consultation, as a value the page can render directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Answered { text: String },
    Failed { kind: ErrorKind, description: String },
}

impl From<Result<String>> for CompletionOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => CompletionOutcome::Answered { text },
            Err(e) => CompletionOutcome::Failed {
                kind: e.kind(),
                description: e.to_user_string(),
            },
        }
    }
}

/// Two-entry prompt: the persona's system prompt, then the user text verbatim
pub fn build_messages(persona: &PersonaDefinition, user_text: &str) -> Vec<Message> {
    vec![
        Message::system(persona.system_prompt.as_str()),
        Message::human(user_text),
    ]
}

/// Sends a persona-framed question to the chat model.
///
/// Holds no per-request state; one outbound call per invocation, never retried.
pub struct ExpertClient {
    registry: Arc<ExpertRegistry>,
    model: Arc<dyn ChatModel>,
    settings: LlmSettings,
}

impl ExpertClient {
    pub fn new(registry: Arc<ExpertRegistry>, model: Arc<dyn ChatModel>, settings: LlmSettings) -> Self {
        Self {
            registry,
            model,
            settings,
        }
    }

    pub fn registry(&self) -> &ExpertRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Ask `persona_key` about `user_text`
    pub async fn complete(&self, user_text: &str, persona_key: &str) -> Result<String> {
        self.complete_with_cancel(user_text, persona_key, &CancellationToken::new())
            .await
    }

    /// Same as [`complete`](Self::complete), bounded by the configured timeout
    /// and abandoned as soon as `cancel` fires.
    pub async fn complete_with_cancel(
        &self,
        user_text: &str,
        persona_key: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let persona = self.registry.lookup(persona_key)?;
        let messages = build_messages(persona, user_text);

        debug!(
            persona = %persona.key,
            input_len = user_text.len(),
            provider = self.model.name(),
            "Consulting expert"
        );

        let start = Instant::now();
        let call = self
            .model
            .complete(messages, &self.settings.model, self.settings.temperature);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ExpertError::Cancelled),
            res = tokio::time::timeout(self.settings.timeout, call) => match res {
                Ok(inner) => inner,
                Err(_) => Err(ExpertError::Timeout(self.settings.timeout)),
            },
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(text) => info!(
                persona = %persona.key,
                duration_ms,
                answer_len = text.len(),
                "Expert answered"
            ),
            Err(e) => warn!(
                persona = %persona.key,
                duration_ms,
                kind = e.kind().as_str(),
                error = %e,
                "Expert call failed"
            ),
        }

        result
    }

    /// Run a submission and fold the result into a renderable outcome.
    ///
    /// Validation is the caller's job; this only resolves the persona and calls.
    pub async fn consult(&self, submission: &Submission, cancel: &CancellationToken) -> CompletionOutcome {
        self.complete_with_cancel(&submission.user_text, &submission.persona_key, cancel)
            .await
            .into()
    }
}
