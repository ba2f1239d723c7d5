// src/llm/openai_compat/response.rs
// OpenAI-compatible chat response parsing

use crate::error::{ExpertError, Result};
use crate::llm::Usage;
use serde::Deserialize;

/// Non-streaming chat response (OpenAI-compatible format)
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ResponseChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseChoice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Parsed result of one chat call
#[derive(Debug, Clone)]
pub struct ChatResult {
    pub content: String,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// Parse an OpenAI-compatible chat response into a ChatResult
pub fn parse_chat_response(response_body: &str) -> Result<ChatResult> {
    let data: ChatResponse = serde_json::from_str(response_body)?;

    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ExpertError::Upstream("response contained no choices".into()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| ExpertError::Upstream("response contained no message content".into()))?;

    Ok(ChatResult {
        content,
        finish_reason: choice.finish_reason,
        usage: data.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_response() {
        let json = r#"{
            "choices": [{
                "message": {"role": "assistant", "content": "Hello, world!"},
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        }"#;

        let result = parse_chat_response(json).unwrap();
        assert_eq!(result.content, "Hello, world!");
        assert_eq!(result.finish_reason.as_deref(), Some("stop"));
        let usage = result.usage.unwrap();
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn test_parse_keeps_content_untouched() {
        let json = r#"{"choices": [{"message": {"content": "  line one\n\n**bold**  "}}]}"#;
        let result = parse_chat_response(json).unwrap();
        assert_eq!(result.content, "  line one\n\n**bold**  ");
        assert!(result.usage.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_chat_response("not json").unwrap_err();
        assert!(matches!(err, ExpertError::Upstream(_)));
    }

    #[test]
    fn test_parse_empty_choices() {
        let json = r#"{"choices": [], "usage": null}"#;
        let err = parse_chat_response(json).unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_parse_null_content() {
        let json = r#"{"choices": [{"message": {"content": null}}]}"#;
        let err = parse_chat_response(json).unwrap_err();
        assert!(err.to_string().contains("no message content"));
    }
}
