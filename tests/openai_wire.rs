// tests/openai_wire.rs
// OpenAI client against a mock chat completions endpoint

use llm_expert::ExpertError;
use llm_expert::config::{ApiKey, LlmSettings};
use llm_expert::experts::prompts::DATA_SCIENTIST_PROMPT;
use llm_expert::experts::{ExpertClient, ExpertRegistry};
use llm_expert::llm::{ChatModel, LlmHttpClient, Message, OpenAiClient};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::with_base_url(ApiKey::new("sk-test"), format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn test_sends_system_then_user_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.2,
            "messages": [
                { "role": "system", "content": "You are terse." },
                { "role": "user", "content": "Say hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let answer = client
        .complete(
            vec![Message::system("You are terse."), Message::human("Say hi")],
            "gpt-4o-mini",
            0.2,
        )
        .await
        .unwrap();

    assert_eq!(answer, "hi");
}

#[tokio::test]
async fn test_error_status_surfaces_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(vec![Message::human("x")], "gpt-4o-mini", 0.2)
        .await
        .unwrap_err();

    match err {
        ExpertError::Upstream(description) => {
            assert!(description.contains("401"));
            assert!(description.contains("Incorrect API key provided"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(vec![Message::human("x")], "gpt-4o-mini", 0.2)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn test_malformed_body_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(vec![Message::human("x")], "gpt-4o-mini", 0.2)
        .await
        .unwrap_err();

    assert!(matches!(err, ExpertError::Upstream(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_upstream_error() {
    let client = OpenAiClient::with_base_url(ApiKey::new("sk-test"), "http://127.0.0.1:1/v1");

    let err = client
        .complete(vec![Message::human("x")], "gpt-4o-mini", 0.2)
        .await
        .unwrap_err();

    assert!(matches!(err, ExpertError::Upstream(_)));
}

#[tokio::test]
async fn test_expert_client_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": DATA_SCIENTIST_PROMPT },
                { "role": "user", "content": "What sample size do I need for an A/B test?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("About 3,800 per arm.")))
        .expect(1)
        .mount(&server)
        .await;

    let settings = LlmSettings {
        base_url: format!("{}/v1", server.uri()),
        ..LlmSettings::default()
    };
    let model = OpenAiClient::from_settings(ApiKey::new("sk-test"), &settings);
    let client = ExpertClient::new(Arc::new(ExpertRegistry::builtin()), Arc::new(model), settings);

    let answer = client
        .complete("What sample size do I need for an A/B test?", "A")
        .await
        .unwrap();
    assert_eq!(answer, "About 3,800 per arm.");
}

#[tokio::test]
async fn test_slow_endpoint_hits_consultation_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let settings = LlmSettings {
        base_url: format!("{}/v1", server.uri()),
        timeout: Duration::from_millis(100),
        ..LlmSettings::default()
    };
    // Same wiring the binary uses
    let model = OpenAiClient::from_settings(ApiKey::new("sk-test"), &settings);
    let client = ExpertClient::new(Arc::new(ExpertRegistry::builtin()), Arc::new(model), settings);

    for _ in 0..5 {
        let err = client.complete("hello", "B").await.unwrap_err();
        assert!(matches!(err, ExpertError::Timeout(_)), "got {:?}", err);
    }
}

#[tokio::test]
async fn test_transport_timeout_is_reported_as_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let http = LlmHttpClient::new(Duration::from_millis(100), Duration::from_secs(1));
    let client = OpenAiClient::with_http(ApiKey::new("sk-test"), format!("{}/v1", server.uri()), http);

    let err = client
        .complete(vec![Message::human("x")], "gpt-4o-mini", 0.2)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ExpertError::Timeout(d) if d == Duration::from_millis(100)),
        "got {:?}",
        err
    );
}
