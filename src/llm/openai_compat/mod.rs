// src/llm/openai_compat/mod.rs
// OpenAI-compatible chat completion request/response handling

mod request;
mod response;

pub use request::ChatRequest;
pub use response::{ChatResult, parse_chat_response};
