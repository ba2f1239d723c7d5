// src/llm/mod.rs
// Chat model clients

pub mod http_client;
pub mod logging;
pub mod openai;
pub mod openai_compat;
mod types;

pub use http_client::LlmHttpClient;
pub use openai::{DEFAULT_BASE_URL, OpenAiClient};
pub use types::{Message, Role, Usage};

use crate::error::Result;
use async_trait::async_trait;

/// The one capability the app needs from a hosted model: send an ordered
/// message list and get the reply text back.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    async fn complete(&self, messages: Vec<Message>, model: &str, temperature: f32)
        -> Result<String>;
}
